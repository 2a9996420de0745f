use crate::{DomainError, ResolutionStrategy};
use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Budget for one attempt against one custom nameserver.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide lookup settings, fixed before the first lookup starts.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub strategy: ResolutionStrategy,
    pub include_ipv6: bool,
    pub max_concurrency: usize,
    pub query_timeout: Duration,
}

impl LookupConfig {
    pub fn new(
        strategy: ResolutionStrategy,
        include_ipv6: bool,
        max_concurrency: usize,
    ) -> Result<Self, DomainError> {
        if max_concurrency == 0 {
            return Err(DomainError::ConfigError(
                "max concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            strategy,
            include_ipv6,
            max_concurrency,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        })
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            strategy: ResolutionStrategy::SystemDefault,
            include_ipv6: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}
