use super::error::GeocodeError;
use super::response::{Address, ReverseResponse};

pub(super) fn parse_reverse_response(resp: ReverseResponse) -> Result<String, GeocodeError> {
    let address = resp.address.ok_or(GeocodeError::MissingAddress)?;
    format_place(&address).ok_or(GeocodeError::MissingAddress)
}

/// Comma-join whichever of road, city, state, country are present, in that
/// priority order. Absent or blank fields are skipped without leaving empty
/// separators behind.
pub(super) fn format_place(address: &Address) -> Option<String> {
    let parts: Vec<&str> = [
        address.road.as_deref(),
        address.city.as_deref(),
        address.state.as_deref(),
        address.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
