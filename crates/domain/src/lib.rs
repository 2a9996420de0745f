//! Resolve Domain Layer
pub mod config;
pub mod errors;
pub mod lookup_outcome;
pub mod nameserver;
pub mod record_type;
pub mod target;

pub use config::{LookupConfig, DEFAULT_MAX_CONCURRENCY, DEFAULT_QUERY_TIMEOUT};
pub use errors::DomainError;
pub use lookup_outcome::{strip_root_dot, LookupOutcome, ResultLine};
pub use nameserver::{Nameserver, ResolutionStrategy, UpstreamAddr, DEFAULT_DNS_PORT};
pub use record_type::RecordType;
pub use target::{LookupKind, Target};
