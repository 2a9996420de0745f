#![allow(dead_code)]
#![allow(unused_imports)]
pub mod dns_server_mock;

pub use dns_server_mock::{MockAnswer, MockBehavior, MockDnsServer};
pub use mock_resolvers::ScriptedResolver;
