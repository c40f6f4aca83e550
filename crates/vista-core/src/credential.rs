//! API key resolution.

use crate::config::resolve_env_var;
use crate::error::ConfigError;

/// Environment variable consulted when no key is passed explicitly.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// An API key for the Gemini service.
///
/// Immutable once resolved. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, rejecting empty or whitespace-only strings.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(Self(key))
    }

    /// Resolve a key from an explicit argument, falling back to the configured
    /// value (which may be a `${ENV_VAR}` reference).
    pub fn resolve(explicit: Option<&str>, configured: &str) -> Result<Self, ConfigError> {
        let key = explicit
            .filter(|k| !k.trim().is_empty())
            .map(String::from)
            .or_else(|| resolve_env_var(configured))
            .ok_or(ConfigError::MissingCredential)?;
        Self::new(key)
    }

    /// The raw key, for request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: &str = "${VISTA_TEST_KEY_THAT_IS_NEVER_SET}";

    #[test]
    fn test_explicit_key_wins() {
        let cred = Credential::resolve(Some("explicit-key"), "configured-key").unwrap();
        assert_eq!(cred.expose(), "explicit-key");
    }

    #[test]
    fn test_falls_back_to_configured_value() {
        let cred = Credential::resolve(None, "configured-key").unwrap();
        assert_eq!(cred.expose(), "configured-key");

        let cred = Credential::resolve(Some(""), "configured-key").unwrap();
        assert_eq!(cred.expose(), "configured-key");
    }

    #[test]
    fn test_missing_everywhere_fails() {
        let err = Credential::resolve(None, UNSET).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));

        let err = Credential::resolve(Some("   "), "").unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new("AIza-secret").unwrap();
        assert_eq!(format!("{cred:?}"), "Credential(***)");
    }
}
