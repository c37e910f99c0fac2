use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PushTokenForm {
    /// `null` unregisters the current device.
    pub push_token: Option<String>,
}
