pub mod client;
pub mod service;

pub use client::{ApiClient, RequestConfig};
pub use service::ApiService;
