use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct ReverseResponse {
    pub(super) address: Option<Address>,
}

/// Address fields the service may supply; any of them can be absent.
#[derive(Debug, Default, Deserialize)]
pub(super) struct Address {
    pub(super) road: Option<String>,
    pub(super) city: Option<String>,
    pub(super) state: Option<String>,
    pub(super) country: Option<String>,
}
