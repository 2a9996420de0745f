use async_trait::async_trait;
use resolve_application::ports::TargetSource;
use resolve_domain::{DomainError, Target};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

/// Every non-blank line of a file, read in full when the source is opened.
pub struct FileTargetSource {
    label: String,
    targets: VecDeque<Target>,
}

impl FileTargetSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let label = path.display().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::TargetSourceError {
                source_name: label.clone(),
                message: e.to_string(),
            })?;

        let targets: VecDeque<Target> = String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(Target::from_line)
            .collect();

        debug!(path = %label, count = targets.len(), "Loaded targets from file");

        Ok(Self { label, targets })
    }
}

#[async_trait]
impl TargetSource for FileTargetSource {
    async fn next_target(&mut self) -> Result<Option<Target>, DomainError> {
        Ok(self.targets.pop_front())
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
