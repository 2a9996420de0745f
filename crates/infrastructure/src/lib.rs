pub mod dns;
pub mod output;
pub mod system;
pub mod targets;
