// merops-api: Async Rust client for the Meraki dashboard API (appliance subset)

mod appliance;
pub mod client;
pub mod error;
mod networks;
mod organizations;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DashboardClient};
pub use error::Error;
pub use transport::TransportConfig;
