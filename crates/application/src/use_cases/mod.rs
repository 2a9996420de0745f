pub mod dispatch_targets;
pub mod resolve_target;

pub use dispatch_targets::{DispatchSummary, DispatchTargetsUseCase};
pub use resolve_target::ResolveTargetUseCase;
