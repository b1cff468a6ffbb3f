use super::client::GeocodeClient;
use super::error::GeocodeError;
use super::parser::{format_place, parse_reverse_response};
use super::response::{Address, ReverseResponse};
use super::UNRESOLVED_PLACE;

#[test]
fn format_place_joins_city_and_country() {
    let address = Address {
        city: Some("Paris".to_string()),
        country: Some("France".to_string()),
        ..Address::default()
    };
    assert_eq!(format_place(&address).as_deref(), Some("Paris, France"));
}

#[test]
fn format_place_keeps_priority_order() {
    let address = Address {
        road: Some("Bd Haussmann".to_string()),
        city: Some("Paris".to_string()),
        state: Some("Île-de-France".to_string()),
        country: Some("France".to_string()),
    };
    assert_eq!(
        format_place(&address).as_deref(),
        Some("Bd Haussmann, Paris, Île-de-France, France")
    );
}

#[test]
fn format_place_skips_blank_fields_without_empty_separators() {
    let address = Address {
        road: Some("  ".to_string()),
        city: Some("Paris".to_string()),
        state: None,
        country: Some("France".to_string()),
    };
    assert_eq!(format_place(&address).as_deref(), Some("Paris, France"));
}

#[test]
fn format_place_returns_none_when_all_fields_absent() {
    assert_eq!(format_place(&Address::default()), None);
}

#[test]
fn parse_reverse_response_requires_an_address() {
    let result = parse_reverse_response(ReverseResponse { address: None });
    assert!(matches!(result, Err(GeocodeError::MissingAddress)));
}

#[test]
fn parse_reverse_response_returns_place() {
    let response = ReverseResponse {
        address: Some(Address {
            city: Some("Paris".to_string()),
            country: Some("France".to_string()),
            ..Address::default()
        }),
    };
    assert_eq!(parse_reverse_response(response).unwrap(), "Paris, France");
}

#[test]
fn reverse_response_deserializes_from_service_json() {
    let json = r#"{"place_id": 1, "address": {"road": "5th Avenue", "city": "New York", "country": "United States", "postcode": "10001"}}"#;
    let response: ReverseResponse = serde_json::from_str(json).unwrap();
    let place = parse_reverse_response(response).unwrap();
    assert_eq!(place, "5th Avenue, New York, United States");
}

#[tokio::test]
async fn resolve_or_unknown_degrades_on_transport_error() {
    // Nothing listens here; the request fails fast with a connect error.
    let client = GeocodeClient::new("http://127.0.0.1:9");
    let place = client.resolve_or_unknown(48.8566, 2.3522).await;
    assert_eq!(place, UNRESOLVED_PLACE);
}
