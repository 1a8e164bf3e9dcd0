pub mod forecast;
pub mod insights;
pub mod metrics;
pub mod network;
pub mod route;
pub mod scenario;
