use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Credentials for authenticating with the Cloudflare API.
///
/// Each variant carries the secret material for its header scheme.
#[derive(Clone, Debug)]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer <token>`.
    /// Generated at: dash.cloudflare.com > My Profile > API Tokens.
    ApiToken { token: SecretString },

    /// Global API key + account email, sent as `X-Auth-Key` / `X-Auth-Email`.
    ApiKey { key: SecretString, email: String },
}

impl Credentials {
    /// Build the default headers for this credential scheme.
    ///
    /// Secret-bearing header values are marked sensitive so they are
    /// redacted from debug output.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        match self {
            Self::ApiToken { token } => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|e| Error::Authentication {
                        message: format!("invalid API token header value: {e}"),
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }

            Self::ApiKey { key, email } => {
                let mut key_value = HeaderValue::from_str(key.expose_secret()).map_err(|e| {
                    Error::Authentication {
                        message: format!("invalid API key header value: {e}"),
                    }
                })?;
                key_value.set_sensitive(true);
                headers.insert("X-Auth-Key", key_value);

                let email_value =
                    HeaderValue::from_str(email).map_err(|e| Error::Authentication {
                        message: format!("invalid auth email header value: {e}"),
                    })?;
                headers.insert("X-Auth-Email", email_value);
            }
        }

        Ok(headers)
    }
}
