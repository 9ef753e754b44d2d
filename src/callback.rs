//! Parsing of the URL the backend redirects the user back to after authorization.
//!
//! The callback carries two query parameters: `auth_success`, which is the string `true` when the user granted access,
//! and `user_id`, the identifier the rest of the backend's endpoints expect.

use crate::session::UserId;

use log::info;
use reqwest::Url;

const AUTH_SUCCESS_PARAM: &str = "auth_success";
const USER_ID_PARAM: &str = "user_id";

/// The result of inspecting a callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCallback {
    /// Authorization succeeded and the backend issued this user ID.
    Authenticated(UserId),
    /// The URL is not a successful callback. The parameters as they were found are kept for diagnostics.
    NotAuthenticated {
        auth_success: Option<String>,
        user_id: Option<String>,
    },
}

impl AuthCallback {
    /// Inspects the query parameters of a page URL.
    pub fn from_url(url: &Url) -> Self {
        let mut auth_success = None;
        let mut user_id = None;

        // the first occurrence of a parameter wins, like URLSearchParams.get
        for (key, value) in url.query_pairs() {
            match &*key {
                AUTH_SUCCESS_PARAM if auth_success.is_none() => auth_success = Some(value.into_owned()),
                USER_ID_PARAM if user_id.is_none() => user_id = Some(value.into_owned()),
                _ => {}
            }
        }

        Self::from_params(auth_success, user_id)
    }

    /// Inspects a page URL given as a string. A string that isn't a valid URL is not a callback.
    pub fn parse(url: &str) -> Self {
        match Url::parse(url) {
            Ok(url) => Self::from_url(&url),
            Err(e) => {
                info!("Page URL {url:?} is not a valid URL ({e}), not treating it as an auth callback");
                Self::NotAuthenticated {
                    auth_success: None,
                    user_id: None,
                }
            }
        }
    }

    fn from_params(auth_success: Option<String>, user_id: Option<String>) -> Self {
        if auth_success.as_deref() == Some("true") {
            if let Some(id) = user_id.as_deref().and_then(|id| UserId::new(id).ok()) {
                return Self::Authenticated(id);
            }
        }

        Self::NotAuthenticated { auth_success, user_id }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated(user_id) => Some(user_id),
            Self::NotAuthenticated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_callback() {
        let callback = AuthCallback::parse("https://example.github.io/?auth_success=true&user_id=U123");
        assert_eq!(callback, AuthCallback::Authenticated(UserId::new("U123").unwrap()));
    }

    #[test]
    fn failed_callback() {
        let callback = AuthCallback::parse("https://example.github.io/?auth_success=false&user_id=U123");
        assert_eq!(
            callback,
            AuthCallback::NotAuthenticated {
                auth_success: Some("false".to_owned()),
                user_id: Some("U123".to_owned()),
            }
        );
    }

    #[test]
    fn missing_user_id() {
        let callback = AuthCallback::parse("https://example.github.io/?auth_success=true");
        assert_eq!(callback.user_id(), None);
    }

    #[test]
    fn empty_user_id() {
        let callback = AuthCallback::parse("https://example.github.io/?auth_success=true&user_id=");
        assert_eq!(callback.user_id(), None);
    }

    #[test]
    fn success_flag_is_case_sensitive() {
        let callback = AuthCallback::parse("https://example.github.io/?auth_success=True&user_id=U123");
        assert_eq!(callback.user_id(), None);
    }

    #[test]
    fn percent_encoded_user_id() {
        let callback = AuthCallback::parse("https://example.github.io/?user_id=some%20user&auth_success=true");
        assert_eq!(callback.user_id().map(UserId::as_str), Some("some user"));
    }

    #[test]
    fn plain_page_load() {
        assert_eq!(AuthCallback::parse("https://example.github.io/").user_id(), None);
        assert_eq!(AuthCallback::parse("not a url").user_id(), None);
    }
}
