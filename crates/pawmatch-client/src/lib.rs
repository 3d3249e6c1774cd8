//! PawMatch Client - Rust SDK for the dog adoption service
//!
//! This crate provides:
//! - HTTP client carrying the cookie-based session across requests
//! - API trait with typed methods for every service endpoint
//! - Model types for requests and responses

pub mod api;
pub mod constants;
pub mod error;
pub mod http;
pub mod model;

pub use api::{DogApi, PawApiClient};
pub use error::{ClientError, Result};
pub use http::{HttpClientConfig, PawHttpClient};
pub use model::*;
