// src/lib.rs

pub mod common;
pub mod config;
pub mod http;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;

pub use common::error::{ApiError, ErrorKind};
pub use config::{ApiConfig, AppState};
pub use http::{ApiClient, ApiService, RequestConfig};
pub use navigation::{MemoryNavigator, Navigator, Route};
pub use session::SessionStore;
