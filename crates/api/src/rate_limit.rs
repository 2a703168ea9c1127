//! Rate Limiting for the Prediction Endpoints
//!
//! GCRA-based per-peer-IP limiting via tower_governor. Prediction is the
//! only compute-bearing route, so only it sits behind the limiter.

use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with X-RateLimit-* response headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Seconds per replenished request
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    /// Effectively unlimited; used by tests
    pub fn unlimited() -> Self {
        Self {
            per_second: 1,
            burst_size: u32::MAX,
        }
    }
}

/// Build the governor config for `GovernorLayer`.
///
/// Requires the service to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so peer IPs are
/// available to the key extractor.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("rate limit config must be non-zero"),
    )
}
