use resolve_application::ports::ResultSink;
use resolve_application::use_cases::{DispatchTargetsUseCase, ResolveTargetUseCase};
use resolve_domain::LookupConfig;
use resolve_infrastructure::dns::build_resolver;
use resolve_infrastructure::output::StdoutSink;
use std::sync::Arc;

pub struct UseCases {
    pub dispatch_targets: DispatchTargetsUseCase,
}

impl UseCases {
    pub fn new(config: &LookupConfig) -> Self {
        let resolver = build_resolver(config);
        let sink: Arc<dyn ResultSink> = Arc::new(StdoutSink::new());

        let resolve_target = Arc::new(ResolveTargetUseCase::new(
            resolver,
            sink,
            config.include_ipv6,
        ));

        Self {
            dispatch_targets: DispatchTargetsUseCase::new(resolve_target, config.max_concurrency),
        }
    }
}
