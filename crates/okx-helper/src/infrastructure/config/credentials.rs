use crate::application::CredentialStatus;
use std::fmt;

/// OKX API credentials plus the base URL they are valid for.
///
/// Built once at startup and never mutated. Any of the three secrets may be
/// unset; signed calls check for completeness before sending anything.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    passphrase: Option<String>,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        Credentials {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: non_empty(api_key),
            api_secret: non_empty(api_secret),
            passphrase: non_empty(passphrase),
        }
    }

    /// Credentials with no secrets, for public endpoints only
    pub fn public(base_url: impl Into<String>) -> Self {
        Self::new(base_url, None, None, None)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            api_key_configured: self.api_key.is_some(),
            api_secret_configured: self.api_secret.is_some(),
            passphrase_configured: self.passphrase.is_some(),
        }
    }

    /// Names of the missing parts, in env var form
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("OKX_API_KEY");
        }
        if self.api_secret.is_none() {
            missing.push("OKX_API_SECRET");
        }
        if self.passphrase.is_none() {
            missing.push("OKX_PASSPHRASE");
        }
        missing
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_unset() {
        let creds = Credentials::new(
            "https://www.okx.com/",
            Some("key".into()),
            Some("   ".into()),
            Some(String::new()),
        );
        assert_eq!(creds.base_url(), "https://www.okx.com");
        assert_eq!(creds.api_key(), Some("key"));
        assert_eq!(creds.api_secret(), None);
        assert_eq!(creds.missing(), vec!["OKX_API_SECRET", "OKX_PASSPHRASE"]);
        assert!(!creds.status().is_complete());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new(
            "https://www.okx.com",
            Some("key".into()),
            Some("top-secret".into()),
            Some("hunter2".into()),
        );
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
        assert!(creds.status().is_complete());
    }
}
