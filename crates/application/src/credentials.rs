//! API credentials for the two upstream services

use secrecy::{ExposeSecret, SecretString};

use crate::error::ApplicationError;

/// Substrings of the template values shipped in sample configurations
const PLACEHOLDER_MARKERS: [&str; 2] = ["您的", "YOUR_GEMINI_API_KEY"];

/// Keys for the forecast and report services
///
/// Both keys are validated on construction: empty values and template
/// placeholders are rejected before any request is made.
#[derive(Clone)]
pub struct Credentials {
    cwa_api_key: SecretString,
    gemini_api_key: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cwa_api_key", &"[REDACTED]")
            .field("gemini_api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Validate and wrap both keys
    ///
    /// # Errors
    /// Returns [`ApplicationError::Configuration`] naming the offending key
    /// when it is blank or still a placeholder.
    pub fn new(
        cwa_api_key: SecretString,
        gemini_api_key: SecretString,
    ) -> Result<Self, ApplicationError> {
        validate_key("cwa.api_key", &cwa_api_key)?;
        validate_key("gemini.api_key", &gemini_api_key)?;
        Ok(Self {
            cwa_api_key,
            gemini_api_key,
        })
    }

    /// Key for the CWA open-data API
    #[must_use]
    pub const fn cwa_api_key(&self) -> &SecretString {
        &self.cwa_api_key
    }

    /// Key for the Gemini API
    #[must_use]
    pub const fn gemini_api_key(&self) -> &SecretString {
        &self.gemini_api_key
    }
}

fn validate_key(name: &str, key: &SecretString) -> Result<(), ApplicationError> {
    let value = key.expose_secret().trim();
    if value.is_empty() {
        return Err(ApplicationError::Configuration(format!("{name} is empty")));
    }
    if PLACEHOLDER_MARKERS.iter().any(|marker| value.contains(marker)) {
        return Err(ApplicationError::Configuration(format!(
            "{name} is still a placeholder; replace it with a real key"
        )));
    }
    Ok(())
}
