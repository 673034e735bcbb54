pub mod client;
pub mod fast;
pub mod models;

pub use client::DdnsApiClient;
pub use fast::FastApiClient;
