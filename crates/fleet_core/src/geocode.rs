//! Reverse geocoding of driver positions via a Nominatim-style service.
//!
//! This module wraps an HTTP client for the `/reverse` endpoint and turns
//! the response's address fields into a display string, without leaking
//! details of the wire format. Resolution fails open: callers that use
//! [GeocodeClient::resolve_or_unknown] always get a string back.

mod client;
mod error;
mod parser;
mod response;

#[cfg(test)]
mod tests;

pub use client::{GeocodeClient, DEFAULT_ENDPOINT};
pub use error::GeocodeError;

/// Sentinel place name used whenever resolution fails or yields nothing.
pub const UNRESOLVED_PLACE: &str = "Unknown";
