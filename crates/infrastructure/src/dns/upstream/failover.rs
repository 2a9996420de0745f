use super::UpstreamResolver;
use async_trait::async_trait;
use resolve_application::ports::LookupResolver;
use resolve_domain::{DomainError, Nameserver};
use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Tries each link in order and returns the first non-empty answer.
///
/// Links are never queried in parallel and answers are never merged. A link
/// that errors counts as an empty answer. When every link fails the last
/// error is returned; when at least one answered empty the result is empty.
pub struct FailoverChain {
    links: Vec<Arc<dyn LookupResolver>>,
}

impl FailoverChain {
    pub fn new(links: Vec<Arc<dyn LookupResolver>>) -> Self {
        Self { links }
    }

    pub fn from_nameservers(nameservers: &[Nameserver], timeout: Duration) -> Self {
        let links = nameservers
            .iter()
            .cloned()
            .map(|ns| Arc::new(UpstreamResolver::new(ns, timeout)) as Arc<dyn LookupResolver>)
            .collect();
        Self::new(links)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    async fn first_non_empty<'a, T, F, Fut>(
        &'a self,
        query: &str,
        mut attempt: F,
    ) -> Result<Vec<T>, DomainError>
    where
        F: FnMut(&'a Arc<dyn LookupResolver>) -> Fut,
        Fut: Future<Output = Result<Vec<T>, DomainError>>,
    {
        if self.links.is_empty() {
            return Err(DomainError::ConfigError(
                "no nameservers configured".to_string(),
            ));
        }
        debug!(strategy = "failover", servers = self.links.len(), query = %query, "Trying sequentially");

        let mut last_error = None;
        let mut answered = false;

        for (position, link) in self.links.iter().enumerate() {
            match attempt(link).await {
                Ok(values) if !values.is_empty() => {
                    debug!(server = link.name(), position, count = values.len(), "Server answered");
                    return Ok(values);
                }
                Ok(_) => {
                    answered = true;
                    debug!(server = link.name(), position, "Empty answer, failing over");
                }
                Err(e) => {
                    debug!(server = link.name(), error = %e, position, "Failing over");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl LookupResolver for FailoverChain {
    async fn lookup_ip(&self, host: &str, include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError> {
        self.first_non_empty(host, |link| link.lookup_ip(host, include_ipv6))
            .await
    }

    async fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DomainError> {
        self.first_non_empty(&ip.to_string(), |link| link.lookup_addr(ip))
            .await
    }

    fn name(&self) -> &str {
        "failover chain"
    }
}
