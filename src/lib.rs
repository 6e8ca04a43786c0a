//! Tripwise: weather-aware point-of-interest recommendations.
//!
//! The library half is the client-side orchestration core — location
//! resolution, weather classification, category advice, and the
//! trigger-driven engine that keeps them race-free. The binary half serves
//! the credential-shielding places forwarder.

pub mod advisor;
pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
