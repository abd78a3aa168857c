//! Creation Hub API client layer.
//!
//! All communication is JSON over HTTP(S). The [`AsyncHttpClient`] trait
//! is the seam between the crate and the network; [`GenerationApi`] maps
//! the hub endpoints onto it and parses responses exactly once at this
//! boundary.

mod client;
mod error;
mod http;
pub mod types;

pub use client::GenerationApi;
pub use error::ApiError;
pub use http::{AsyncHttpClient, FormPart, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
