//! Backend API client.

mod http_backend;

pub use http_backend::HttpBackend;
