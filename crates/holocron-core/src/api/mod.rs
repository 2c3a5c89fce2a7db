//! REST API client module for the Star Wars API (SWAPI).
//!
//! This module provides the `ApiClient` for fetching character listings,
//! single characters, and species from SWAPI. Requests go through the
//! `Transport` trait so the network can be replaced in tests.
//!
//! SWAPI is public and unauthenticated.

pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use transport::{HttpTransport, Transport};
