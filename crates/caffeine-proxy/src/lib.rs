//! Caffeine Broker Backend Proxy
//!
//! This crate provides the client for communicating with the backend
//! cache-management API, handling credential attachment and URL building.

pub mod client;
pub mod error;

pub use client::{CaffeineClient, CaffeineClientConfig, basic_auth_header};
pub use error::ProxyError;
