#![allow(dead_code)]

use async_trait::async_trait;
use resolve_application::ports::{LookupResolver, ResultSink, TargetSource};
use resolve_domain::{DomainError, ResultLine, Target};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MockLookupResolver {
    forward: Mutex<HashMap<String, Result<Vec<IpAddr>, DomainError>>>,
    reverse: Mutex<HashMap<IpAddr, Result<Vec<String>, DomainError>>>,
    ipv6_requests: Mutex<Vec<bool>>,
}

impl MockLookupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_addresses(&self, host: &str, addresses: &[&str]) {
        let addresses = addresses.iter().map(|a| a.parse().unwrap()).collect();
        self.forward
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(addresses));
    }

    pub fn set_forward_error(&self, host: &str, error: DomainError) {
        self.forward
            .lock()
            .unwrap()
            .insert(host.to_string(), Err(error));
    }

    pub fn set_names(&self, ip: &str, names: &[&str]) {
        let names = names.iter().map(|n| n.to_string()).collect();
        self.reverse
            .lock()
            .unwrap()
            .insert(ip.parse().unwrap(), Ok(names));
    }

    pub fn set_reverse_error(&self, ip: &str, error: DomainError) {
        self.reverse
            .lock()
            .unwrap()
            .insert(ip.parse().unwrap(), Err(error));
    }

    pub fn ipv6_requests(&self) -> Vec<bool> {
        self.ipv6_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupResolver for MockLookupResolver {
    async fn lookup_ip(&self, host: &str, include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError> {
        self.ipv6_requests.lock().unwrap().push(include_ipv6);
        self.forward
            .lock()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DomainError> {
        self.reverse
            .lock()
            .unwrap()
            .get(&ip)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Records how many lookups run at the same time.
pub struct CountingResolver {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn track(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LookupResolver for CountingResolver {
    async fn lookup_ip(&self, _host: &str, _include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError> {
        self.track().await;
        Ok(vec!["192.0.2.1".parse().unwrap()])
    }

    async fn lookup_addr(&self, _ip: IpAddr) -> Result<Vec<String>, DomainError> {
        self.track().await;
        Ok(vec!["host.example.".to_string()])
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// In-memory target source that can fail after a given number of reads.
pub struct VecTargetSource {
    targets: std::vec::IntoIter<Target>,
    fail_after: Option<usize>,
    reads: Arc<AtomicUsize>,
}

impl VecTargetSource {
    pub fn new(targets: &[&str]) -> Self {
        Self {
            targets: targets
                .iter()
                .map(|t| Target::new(t))
                .collect::<Vec<_>>()
                .into_iter(),
            fail_after: None,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_after(mut self, reads: usize) -> Self {
        self.fail_after = Some(reads);
        self
    }

    pub fn reads(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl TargetSource for VecTargetSource {
    async fn next_target(&mut self) -> Result<Option<Target>, DomainError> {
        let done = self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_after == Some(done) {
            return Err(DomainError::TargetSourceError {
                source_name: "memory".to_string(),
                message: "broken pipe".to_string(),
            });
        }
        Ok(self.targets.next())
    }

    fn describe(&self) -> &str {
        "memory"
    }
}

#[derive(Default)]
pub struct CollectingSink {
    batches: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

impl ResultSink for CollectingSink {
    fn emit(&self, lines: &[ResultLine]) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::OutputError("closed".to_string()));
        }
        self.batches
            .lock()
            .unwrap()
            .push(lines.iter().map(|l| l.to_string()).collect());
        Ok(())
    }
}
