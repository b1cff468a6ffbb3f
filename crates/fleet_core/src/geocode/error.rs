use thiserror::Error;

/// Errors encountered while reverse-geocoding a position.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("reverse geocode request failed: {0}")]
    Http(reqwest::Error),
    #[error("reverse geocode response decode failed: {0}")]
    Json(reqwest::Error),
    #[error("reverse geocode response carried no usable address fields")]
    MissingAddress,
}
