//! # trailcrumb
//!
//! Library half of the Trailcrumb binary: site loading and the HTTP API,
//! exposed so integration tests can drive the router directly.

pub mod api;
pub mod site;
