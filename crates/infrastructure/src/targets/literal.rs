use async_trait::async_trait;
use resolve_application::ports::TargetSource;
use resolve_domain::{DomainError, Target};

/// The command-line argument itself, yielded once.
pub struct LiteralTargetSource {
    target: Option<Target>,
}

impl LiteralTargetSource {
    pub fn new(value: &str) -> Self {
        Self {
            target: Target::from_line(value),
        }
    }
}

#[async_trait]
impl TargetSource for LiteralTargetSource {
    async fn next_target(&mut self) -> Result<Option<Target>, DomainError> {
        Ok(self.target.take())
    }

    fn describe(&self) -> &str {
        "argument"
    }
}
