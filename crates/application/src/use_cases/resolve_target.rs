use crate::ports::{LookupResolver, ResultSink};
use resolve_domain::{LookupKind, LookupOutcome, Target};
use std::sync::Arc;
use tracing::{debug, warn};

/// Classifies a target, runs the matching lookup and hands the lines to the sink.
pub struct ResolveTargetUseCase {
    resolver: Arc<dyn LookupResolver>,
    sink: Arc<dyn ResultSink>,
    include_ipv6: bool,
}

impl ResolveTargetUseCase {
    pub fn new(
        resolver: Arc<dyn LookupResolver>,
        sink: Arc<dyn ResultSink>,
        include_ipv6: bool,
    ) -> Self {
        Self {
            resolver,
            sink,
            include_ipv6,
        }
    }

    pub async fn execute(&self, target: &Target) {
        let outcome = self.lookup(target).await;
        let lines = outcome.into_lines();

        if let Err(e) = self.sink.emit(&lines) {
            warn!(error = %e, target = %target, "Failed to write results");
        }
    }

    /// Resolver errors collapse into an empty outcome.
    pub async fn lookup(&self, target: &Target) -> LookupOutcome {
        match target.kind() {
            LookupKind::Forward => {
                let addresses = self
                    .resolver
                    .lookup_ip(target.as_str(), self.include_ipv6)
                    .await
                    .unwrap_or_else(|e| {
                        debug!(
                            target = %target,
                            resolver = self.resolver.name(),
                            error = %e,
                            "Forward lookup failed"
                        );
                        Vec::new()
                    });

                LookupOutcome::forward(target.clone(), addresses, self.include_ipv6)
            }
            LookupKind::Reverse(ip) => {
                let names = self.resolver.lookup_addr(ip).await.unwrap_or_else(|e| {
                    debug!(
                        target = %target,
                        resolver = self.resolver.name(),
                        error = %e,
                        "Reverse lookup failed"
                    );
                    Vec::new()
                });

                LookupOutcome::reverse(target.clone(), names)
            }
        }
    }
}
