// Declare modules within this crate
pub mod client;
pub mod config;
pub mod container;
pub mod errors;
pub mod models;
pub mod response;
pub mod transport;

// Re-export the main components for users of this crate
pub use client::HttpTransport;
pub use config::{ContainerConfig, DEFAULT_END_POINT};
pub use container::{Container, API_KEY_HEADER};
pub use errors::{ApiError, ContainerError};
pub use models::{Credentials, LambdaCall, Session, Signup};
pub use response::ApiResponse;
pub use transport::{Transport, TransportRequest, TransportResponse};
