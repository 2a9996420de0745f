pub mod failover;
pub mod query;
pub mod reverse_name;
pub mod upstream_resolver;

pub use failover::FailoverChain;
pub use query::{query_server, QueryAttemptResult};
pub use reverse_name::ip_to_reverse_domain;
pub use upstream_resolver::UpstreamResolver;
