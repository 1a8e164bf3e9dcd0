pub mod accuracy;
pub mod busy_guard;
pub mod forecast_csv;
pub mod forecast_engine;
pub mod forecast_models;
pub mod forecast_plot;
pub mod forecast_session;
pub mod insights;
pub mod network_analysis;
pub mod network_connectivity;
pub mod network_graph;
pub mod network_yaml;
pub mod route_planner;
pub mod route_strategies;
pub mod sample_network;
pub mod scenario_planner;
pub mod shortest_path;
pub mod synthetic_history;
