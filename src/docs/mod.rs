//! API Documentation module
//!
//! Provides OpenAPI specification generation for the relay API using utoipa.

mod openapi;

pub use openapi::ApiDoc;
