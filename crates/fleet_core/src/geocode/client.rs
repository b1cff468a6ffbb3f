use std::time::Duration;

use super::error::GeocodeError;
use super::parser::parse_reverse_response;
use super::response::ReverseResponse;
use super::UNRESOLVED_PLACE;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Public Nominatim instance; override for self-hosted deployments or tests.
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Thin HTTP client for reverse geocoding.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeocodeClient {
    /// Create a client for the given endpoint (e.g. [DEFAULT_ENDPOINT]).
    pub fn new(endpoint: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("fleet-telemetry/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build geocode client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a position to a display string built from the service's
    /// address fields.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodeError> {
        let url = format!("{}/reverse", self.endpoint);
        let lat = format!("{lat:.6}");
        let lon = format!("{lon:.6}");
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await
            .map_err(GeocodeError::Http)?;

        let parsed: ReverseResponse = response.json().await.map_err(GeocodeError::Json)?;
        parse_reverse_response(parsed)
    }

    /// Fail-open wrapper: transport failures, malformed responses, and
    /// missing address fields all degrade to [UNRESOLVED_PLACE]. Never
    /// returns an error, so a resolver outage cannot abort a simulation
    /// tick.
    pub async fn resolve_or_unknown(&self, lat: f64, lon: f64) -> String {
        match self.reverse(lat, lon).await {
            Ok(place) => place,
            Err(err) => {
                tracing::warn!(error = %err, lat, lon, "reverse geocode failed");
                UNRESOLVED_PLACE.to_string()
            }
        }
    }
}
