use serde::Deserialize;

/// The backend's answer to a credentials submission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsResponse {
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What a [CredentialsResponse] asks the client to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsOutcome {
    /// The user should be sent to this authorization URL.
    Redirect(String),
    /// The backend refused the credentials with the given reason.
    Rejected(String),
    /// The response had neither an authorization URL nor an error.
    Unexpected,
}

impl CredentialsResponse {
    /// Classifies the response. An authorization URL takes precedence over an error.
    pub fn outcome(&self) -> CredentialsOutcome {
        match (&self.auth_url, &self.error) {
            (Some(auth_url), _) if !auth_url.is_empty() => CredentialsOutcome::Redirect(auth_url.clone()),
            (_, Some(error)) if !error.is_empty() => CredentialsOutcome::Rejected(error.clone()),
            _ => CredentialsOutcome::Unexpected,
        }
    }
}

impl From<CredentialsResponse> for CredentialsOutcome {
    fn from(response: CredentialsResponse) -> Self {
        response.outcome()
    }
}
