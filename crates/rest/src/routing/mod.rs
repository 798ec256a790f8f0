//! Route configuration for the listing REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod listing_routes;

pub use listing_routes::create_routes;
