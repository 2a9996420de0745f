pub mod factory;
pub mod forwarding;
pub mod transport;
pub mod upstream;

pub use factory::build_resolver;
pub use upstream::{FailoverChain, UpstreamResolver};
