//! HTTP API: router, handlers, extractors and OpenAPI document

pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
mod server;
pub mod types;

pub use server::ApiServer;
