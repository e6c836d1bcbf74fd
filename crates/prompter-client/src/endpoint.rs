//! Active relay host selection.

use prompter_config::ClientConfig;
use prompter_protocols::EndpointRole;

/// Primary and fallback relay hosts plus the one currently in use.
///
/// Starts on the primary; once switched to the fallback it stays there for
/// the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointState {
    primary: String,
    fallback: String,
    active: EndpointRole,
}

impl EndpointState {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: normalize(primary.into()),
            fallback: normalize(fallback.into()),
            active: EndpointRole::Primary,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.primary_url.clone(), config.fallback_url.clone())
    }

    pub fn primary_url(&self) -> &str {
        &self.primary
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback
    }

    pub fn active_role(&self) -> EndpointRole {
        self.active
    }

    pub fn active_url(&self) -> &str {
        match self.active {
            EndpointRole::Primary => &self.primary,
            EndpointRole::Fallback => &self.fallback,
        }
    }

    /// Move to the fallback host. Returns `false` if already there.
    pub fn switch_to_fallback(&mut self) -> bool {
        let switched = self.active == EndpointRole::Primary;
        self.active = EndpointRole::Fallback;
        switched
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_primary() {
        let endpoints = EndpointState::new("http://localhost:5000/", "https://relay.example/api");
        assert_eq!(endpoints.active_role(), EndpointRole::Primary);
        assert_eq!(endpoints.active_url(), "http://localhost:5000");
    }

    #[test]
    fn test_switch_is_permanent() {
        let mut endpoints = EndpointState::new("http://a", "http://b");
        assert!(endpoints.switch_to_fallback());
        assert!(!endpoints.switch_to_fallback());
        assert_eq!(endpoints.active_role(), EndpointRole::Fallback);
        assert_eq!(endpoints.active_url(), "http://b");
    }

    #[test]
    fn test_from_config() {
        let endpoints = EndpointState::from_config(&ClientConfig::default());
        assert_eq!(endpoints.primary_url(), "http://localhost:5000");
        assert_eq!(
            endpoints.fallback_url(),
            "https://ai-prompter-extension.vercel.app/api"
        );
    }
}
