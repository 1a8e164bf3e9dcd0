use std::collections::{BTreeSet, VecDeque};

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::services::network_graph::SupplyNetwork;

/// Directed successor sets by node position. Parallel edges and self
/// loops collapse, so each pair of nodes counts once.
fn successor_sets(network: &SupplyNetwork) -> Vec<BTreeSet<usize>> {
    let graph = network.graph();
    graph
        .node_indices()
        .map(|index| {
            graph
                .neighbors_directed(index, Direction::Outgoing)
                .map(NodeIndex::index)
                .filter(|&next| next != index.index())
                .collect()
        })
        .collect()
}

/// Neighbour sets of the network with edge directions dropped.
fn undirected_neighbours(network: &SupplyNetwork) -> Vec<BTreeSet<usize>> {
    let mut neighbours = successor_sets(network);
    for from in 0..neighbours.len() {
        let targets: Vec<usize> = neighbours[from].iter().copied().collect();
        for to in targets {
            neighbours[to].insert(from);
        }
    }
    neighbours
}

/// Betweenness centrality of every node, in node insertion order.
///
/// Shortest paths are counted by hops. Scores are normalized by
/// `(n - 1)(n - 2)` once the network has more than two nodes.
pub fn betweenness_centrality(network: &SupplyNetwork) -> Vec<f64> {
    let successors = successor_sets(network);
    let count = successors.len();
    let mut centrality = vec![0.0; count];

    for source in 0..count {
        let mut order = Vec::with_capacity(count);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut paths = vec![0.0_f64; count];
        let mut distance: Vec<Option<usize>> = vec![None; count];
        paths[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            let Some(hops) = distance[current] else {
                continue;
            };
            for &next in &successors[current] {
                if distance[next].is_none() {
                    distance[next] = Some(hops + 1);
                    queue.push_back(next);
                }
                if distance[next] == Some(hops + 1) {
                    paths[next] += paths[current];
                    predecessors[next].push(current);
                }
            }
        }

        let mut dependency = vec![0.0_f64; count];
        while let Some(current) = order.pop() {
            for &previous in &predecessors[current] {
                dependency[previous] +=
                    paths[previous] / paths[current] * (1.0 + dependency[current]);
            }
            if current != source {
                centrality[current] += dependency[current];
            }
        }
    }

    if count > 2 {
        let scale = 1.0 / ((count - 1) * (count - 2)) as f64;
        for value in &mut centrality {
            *value *= scale;
        }
    }
    centrality
}

/// Mean number of internally node-disjoint paths over every unordered
/// pair of nodes, ignoring edge direction. `None` below two nodes.
pub fn average_node_connectivity(network: &SupplyNetwork) -> Option<f64> {
    let neighbours = undirected_neighbours(network);
    let count = neighbours.len();
    if count < 2 {
        return None;
    }

    let mut total = 0_u64;
    let mut pairs = 0_u64;
    for first in 0..count {
        for second in first + 1..count {
            total += u64::from(local_node_connectivity(&neighbours, first, second));
            pairs += 1;
        }
    }
    Some(total as f64 / pairs as f64)
}

/// Number of edge-disjoint paths between two nodes, ignoring edge
/// direction. Unreachable pairs have none.
pub fn edge_disjoint_paths(network: &SupplyNetwork, source: usize, target: usize) -> u32 {
    let neighbours = undirected_neighbours(network);
    let count = neighbours.len();
    if source >= count || target >= count || source == target {
        return 0;
    }

    let mut capacity = vec![vec![0_u32; count]; count];
    for (from, targets) in neighbours.iter().enumerate() {
        for &to in targets {
            capacity[from][to] = 1;
        }
    }
    max_flow(&mut capacity, source, target)
}

/// Each node is split into an entry and an exit joined by a unit arc, so
/// a unit of flow from the exit of `source` to the entry of `target` is
/// one path with no shared intermediate node.
fn local_node_connectivity(neighbours: &[BTreeSet<usize>], source: usize, target: usize) -> u32 {
    let count = neighbours.len();
    let entry = |node: usize| 2 * node;
    let exit = |node: usize| 2 * node + 1;

    let mut capacity = vec![vec![0_u32; 2 * count]; 2 * count];
    for (node, targets) in neighbours.iter().enumerate() {
        capacity[entry(node)][exit(node)] = 1;
        for &to in targets {
            capacity[exit(node)][entry(to)] = 1;
        }
    }
    max_flow(&mut capacity, exit(source), entry(target))
}

/// Edmonds-Karp over a dense residual capacity matrix.
fn max_flow(capacity: &mut [Vec<u32>], source: usize, sink: usize) -> u32 {
    let size = capacity.len();
    let mut flow = 0;

    loop {
        let mut parent: Vec<Option<usize>> = vec![None; size];
        parent[source] = Some(source);
        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            if current == sink {
                break;
            }
            for next in 0..size {
                if parent[next].is_none() && capacity[current][next] > 0 {
                    parent[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }
        if parent[sink].is_none() {
            return flow;
        }

        let mut path = Vec::new();
        let mut node = sink;
        while node != source {
            let Some(previous) = parent[node] else {
                break;
            };
            path.push((previous, node));
            node = previous;
        }

        let bottleneck = path
            .iter()
            .map(|&(from, to)| capacity[from][to])
            .min()
            .unwrap_or(0);
        if bottleneck == 0 {
            return flow;
        }
        for &(from, to) in &path {
            capacity[from][to] -= bottleneck;
            capacity[to][from] += bottleneck;
        }
        flow += bottleneck;
    }
}
