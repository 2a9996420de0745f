mod lookup_resolver;
mod result_sink;
mod target_source;

pub use lookup_resolver::LookupResolver;
pub use result_sink::ResultSink;
pub use target_source::TargetSource;
