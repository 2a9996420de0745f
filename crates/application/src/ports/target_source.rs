use async_trait::async_trait;
use resolve_domain::{DomainError, Target};

#[async_trait]
pub trait TargetSource: Send {
    /// Next target, `Ok(None)` once the source is exhausted.
    ///
    /// A read error is fatal for the whole run.
    async fn next_target(&mut self) -> Result<Option<Target>, DomainError>;

    fn describe(&self) -> &str;
}
