//! Route configuration for the person API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod person_routes;

pub use person_routes::create_routes;
