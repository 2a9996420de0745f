use super::upstream::FailoverChain;
use crate::system::SystemResolver;
use resolve_application::ports::LookupResolver;
use resolve_domain::{LookupConfig, ResolutionStrategy};
use std::sync::Arc;
use tracing::info;

/// Picks the resolver for the configured strategy.
pub fn build_resolver(config: &LookupConfig) -> Arc<dyn LookupResolver> {
    match &config.strategy {
        ResolutionStrategy::SystemDefault => {
            info!("Using the system resolver");
            Arc::new(SystemResolver::new())
        }
        ResolutionStrategy::CustomChain(nameservers) => {
            info!(
                servers = nameservers.len(),
                timeout_ms = config.query_timeout.as_millis() as u64,
                "Using custom nameservers"
            );
            Arc::new(FailoverChain::from_nameservers(
                nameservers,
                config.query_timeout,
            ))
        }
    }
}
