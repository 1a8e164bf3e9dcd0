use supplyflow::domain::forecast::ForecastModel;
use supplyflow::domain::route::RouteCalculation;
use supplyflow::domain::scenario::{Scenario, ScenarioImpact};
use supplyflow::services::forecast_session::ForecastSnapshot;
use supplyflow::services::network_analysis::NetworkAnalysis;
use supplyflow::services::network_graph::SupplyNetwork;

pub fn format_route_report(calculation: &RouteCalculation, network: &SupplyNetwork) -> String {
    let result = &calculation.result;
    let stops: Vec<String> = result
        .path
        .iter()
        .map(|id| match network.node(id) {
            Some(node) if node.name != *id => format!("{} ({})", node.name, id),
            _ => id.clone(),
        })
        .collect();

    let mut lines = Vec::new();
    lines.push("Route Report".to_string());
    lines.push(format!("Calculation: {}", calculation.id));
    lines.push(format!("Algorithm: {}", calculation.algorithm));
    lines.push(format!("Weighting: {}", calculation.weighting));
    lines.push(format!("Path: {}", stops.join(" -> ")));
    lines.push(format!("Hops: {}", result.hop_count()));
    lines.push(format!("Total cost: {:.2}", result.total_cost));
    lines.push(format!("Total time: {:.1} days", result.total_time));
    lines.push(format!("Total distance: {:.0} km", result.total_distance));
    lines.push(format!("Risk score: {:.2}", result.risk_score));
    lines.push(format!("Efficiency: {:.0}", result.efficiency));

    if !result.alternative_routes.is_empty() {
        lines.push(String::new());
        lines.push("Alternatives:".to_string());
        lines.push("Weighting | Cost | Time | Confidence | Path".to_string());
        lines.push("----------|------|------|------------|-----".to_string());
        for alternative in &result.alternative_routes {
            lines.push(format!(
                "{} | {:.2} | {:.1} | {:.0}% | {}",
                alternative.weighting,
                alternative.cost,
                alternative.time,
                alternative.confidence * 100.0,
                alternative.path.join(" -> ")
            ));
        }
    }

    lines.join("\n")
}

pub fn format_analysis_report(analysis: &NetworkAnalysis) -> String {
    let mut lines = Vec::new();
    lines.push("Network Analysis".to_string());
    lines.push(format!("Nodes: {}", analysis.total_nodes));
    lines.push(format!("Edges: {}", analysis.total_edges));
    lines.push(format!("Density: {:.3}", analysis.density));
    lines.push(format!(
        "Connected: {}",
        if analysis.weakly_connected { "yes" } else { "no" }
    ));
    lines.push(format!(
        "Resilience: {:.2} ({})",
        analysis.resilience.score,
        analysis.resilience.level.as_str()
    ));
    lines.push(String::new());

    lines.push("Critical nodes:".to_string());
    lines.push("Node | Type | Centrality".to_string());
    lines.push("-----|------|-----------".to_string());
    for node in &analysis.critical_nodes {
        lines.push(format!(
            "{} | {} | {:.3}",
            node.name,
            node.category.as_str(),
            node.centrality
        ));
    }
    lines.push(String::new());

    if analysis.bottlenecks.is_empty() {
        lines.push("Bottlenecks: none".to_string());
    } else {
        lines.push("Bottlenecks:".to_string());
        lines.push("Node | Utilization | Severity".to_string());
        lines.push("-----|-------------|---------".to_string());
        for bottleneck in &analysis.bottlenecks {
            lines.push(format!(
                "{} | {:.0}% | {:?}",
                bottleneck.name,
                bottleneck.utilization * 100.0,
                bottleneck.severity
            ));
        }
    }

    lines.push(String::new());
    lines.push("Top routes:".to_string());
    lines.push("Route | From | To | Mode | Score".to_string());
    lines.push("------|------|----|------|------".to_string());
    for route in &analysis.top_routes {
        lines.push(format!(
            "{} | {} | {} | {} | {:.3}",
            route.route_id,
            route.source,
            route.target,
            route.transport_mode.as_str(),
            route.score
        ));
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    lines.extend(analysis.recommendations.iter().map(|item| format!("- {item}")));
    lines.join("\n")
}

pub fn format_models_report(models: &[ForecastModel]) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Models".to_string());
    lines.push("Id | Name | Accuracy | Training | Complexity | Best for".to_string());
    lines.push("---|------|----------|----------|------------|---------".to_string());
    for model in models {
        lines.push(format!(
            "{} | {} | {:.1}% | {}s | {} | {}",
            model.id.as_str(),
            model.name,
            model.accuracy,
            model.training_time,
            model.complexity.as_str(),
            model.best_for.join(", ")
        ));
    }
    lines.join("\n")
}

pub fn format_forecast_report(snapshot: &ForecastSnapshot) -> String {
    let forecast: Vec<_> = snapshot.forecast_points().collect();
    let model = snapshot
        .model
        .map(|model| model.as_str().to_string())
        .unwrap_or_else(|| "n/a".to_string());

    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Model: {model}"));
    lines.push(format!(
        "Historical points: {}",
        snapshot.series.len() - forecast.len()
    ));
    lines.push(format!("Forecast points: {}", forecast.len()));
    if let (Some(first), Some(last)) = (forecast.first(), forecast.last()) {
        lines.push(format!("Forecast range: {} to {}", first.date(), last.date()));
    }
    let total: f64 = forecast.iter().filter_map(|point| point.predicted()).sum();
    lines.push(format!("Total predicted demand: {total:.0}"));

    if let Some(metrics) = &snapshot.metrics {
        lines.push(String::new());
        lines.push("Accuracy (back-test):".to_string());
        lines.push(format!("MAE: {:.2}", metrics.mae));
        lines.push(format!("MAPE: {:.2}%", metrics.mape));
        lines.push(format!("RMSE: {:.2}", metrics.rmse));
        lines.push(format!("R2: {:.3}", metrics.r2_score));
        lines.push(format!("Accuracy: {:.2}%", metrics.accuracy));
    }

    if let Some(insights) = &snapshot.insights {
        lines.push(String::new());
        lines.push("Insights:".to_string());
        lines.push(format!(
            "Trend: {} ({})",
            insights.trend.as_str(),
            insights.trend_change
        ));
        if let Some(pattern) = &insights.seasonal_pattern {
            lines.push(format!("Seasonality: {pattern}"));
        }
        lines.push(format!("Key drivers: {}", insights.key_drivers.join(", ")));
        lines.push(format!("Risk factors: {}", insights.risk_factors.join(", ")));
        lines.push("Recommendations:".to_string());
        lines.extend(insights.recommendations.iter().map(|item| format!("- {item}")));
    }

    lines.join("\n")
}

pub fn format_scenarios_report(impacts: &[(Scenario, ScenarioImpact)]) -> String {
    let mut lines = Vec::new();
    lines.push("Scenario Impact".to_string());
    lines.push("Scenario | Impact | Total demand | Variance".to_string());
    lines.push("---------|--------|--------------|---------".to_string());
    for (scenario, impact) in impacts {
        lines.push(format!(
            "{} | {:+.1}% | {:.0} | {:+}%",
            scenario.name, impact.impact, impact.total_demand, impact.variance
        ));
    }
    lines.join("\n")
}
