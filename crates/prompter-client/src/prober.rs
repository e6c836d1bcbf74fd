//! Startup reachability probe.

use std::sync::Arc;
use std::time::Duration;

use prompter_protocols::{EndpointRole, ReadinessState, RelayTransport};
use tracing::{debug, info, warn};

use crate::endpoint::EndpointState;

/// Default `/health` timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks which relay host answers `/health`.
///
/// The result is informational only; generation does its own fallback.
pub struct StatusProber {
    transport: Arc<dyn RelayTransport>,
    timeout: Duration,
}

impl StatusProber {
    pub fn new(transport: Arc<dyn RelayTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Probe the primary, then the fallback. A healthy fallback becomes the
    /// active endpoint.
    pub async fn probe(&self, endpoints: &mut EndpointState) -> ReadinessState {
        match self
            .transport
            .health(endpoints.primary_url(), self.timeout)
            .await
        {
            Ok(status) if is_success(status) => {
                info!("Primary relay ready at {}", endpoints.primary_url());
                return ReadinessState::Ready(EndpointRole::Primary);
            }
            Ok(status) => debug!("Primary relay answered {}", status),
            Err(e) => debug!("Primary relay unreachable: {}", e),
        }

        match self
            .transport
            .health(endpoints.fallback_url(), self.timeout)
            .await
        {
            Ok(status) if is_success(status) => {
                endpoints.switch_to_fallback();
                info!("Using fallback relay at {}", endpoints.fallback_url());
                ReadinessState::Ready(EndpointRole::Fallback)
            }
            Ok(status) => {
                warn!("Fallback relay answered {}", status);
                ReadinessState::ServerError
            }
            Err(e) => {
                warn!("Fallback relay unreachable: {}", e);
                ReadinessState::Offline
            }
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use prompter_protocols::UserError;

    const PRIMARY: &str = "http://localhost:5000";
    const FALLBACK: &str = "https://relay.example/api";

    async fn run(stub: StubTransport) -> (ReadinessState, EndpointState, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let prober = StatusProber::new(stub.clone(), DEFAULT_PROBE_TIMEOUT);
        let mut endpoints = EndpointState::new(PRIMARY, FALLBACK);
        let state = prober.probe(&mut endpoints).await;
        (state, endpoints, stub)
    }

    #[tokio::test]
    async fn test_primary_healthy() {
        let (state, endpoints, stub) = run(StubTransport::new()).await;

        assert_eq!(state, ReadinessState::Ready(EndpointRole::Primary));
        assert_eq!(state.label(), "Ready (Local)");
        assert_eq!(endpoints.active_role(), EndpointRole::Primary);
        assert_eq!(stub.health_calls(), vec![PRIMARY]);
    }

    #[tokio::test]
    async fn test_fallback_healthy_switches() {
        let stub = StubTransport::new().on_health(|url| {
            if url == PRIMARY {
                Err(UserError::Timeout)
            } else {
                Ok(200)
            }
        });
        let (state, endpoints, stub) = run(stub).await;

        assert_eq!(state, ReadinessState::Ready(EndpointRole::Fallback));
        assert_eq!(state.label(), "Ready");
        assert_eq!(endpoints.active_url(), FALLBACK);
        assert_eq!(stub.health_calls(), vec![PRIMARY, FALLBACK]);
    }

    #[tokio::test]
    async fn test_primary_non_2xx_tries_fallback() {
        let stub = StubTransport::new().on_health(|url| if url == PRIMARY { Ok(500) } else { Ok(204) });
        let (state, _, _) = run(stub).await;
        assert_eq!(state, ReadinessState::Ready(EndpointRole::Fallback));
    }

    #[tokio::test]
    async fn test_fallback_error_status() {
        let stub = StubTransport::new().on_health(|url| {
            if url == PRIMARY {
                Err(UserError::Connectivity("refused".into()))
            } else {
                Ok(503)
            }
        });
        let (state, endpoints, _) = run(stub).await;

        assert_eq!(state, ReadinessState::ServerError);
        assert_eq!(state.label(), "Server Error");
        assert_eq!(endpoints.active_role(), EndpointRole::Primary);
    }

    #[tokio::test]
    async fn test_both_unreachable() {
        let stub =
            StubTransport::new().on_health(|_| Err(UserError::Connectivity("refused".into())));
        let (state, endpoints, _) = run(stub).await;

        assert_eq!(state, ReadinessState::Offline);
        assert_eq!(state.label(), "Server Offline");
        assert_eq!(endpoints.active_role(), EndpointRole::Primary);
    }
}
