use crate::constants::{API_KEY_HEADER, API_KEY_ID_HEADER};
use crate::error::Result;
use reqwest::RequestBuilder;
use std::time::Duration;

/// Client-id/secret pair sent with every map API request.
#[derive(Debug, Clone, Default)]
pub struct NcpCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl NcpCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_ID_HEADER, &self.client_id)
            .header(API_KEY_HEADER, &self.client_secret)
    }
}

/// Shared reqwest client. No timeout unless one is configured.
pub fn build_client(timeout_seconds: Option<u64>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_adds_both_headers() {
        let client = build_client(Some(5)).unwrap();
        let creds = NcpCredentials::new("id-123", "secret-456");
        let request = creds
            .sign(client.get("http://localhost/geocode"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[API_KEY_ID_HEADER], "id-123");
        assert_eq!(request.headers()[API_KEY_HEADER], "secret-456");
    }

    #[test]
    fn blank_credentials_are_not_configured() {
        assert!(!NcpCredentials::default().is_configured());
        assert!(NcpCredentials::new("a", "b").is_configured());
    }
}
