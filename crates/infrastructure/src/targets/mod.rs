//! Target sources: where the list of hostnames and addresses comes from.
//!
//! The single positional argument is read as a file when it names an
//! existing regular file and taken as a literal target otherwise. With no
//! argument, targets stream from stdin one per line.

pub mod file;
pub mod literal;
pub mod stream;

pub use file::FileTargetSource;
pub use literal::LiteralTargetSource;
pub use stream::LineStreamSource;

use resolve_application::ports::TargetSource;
use resolve_domain::DomainError;
use std::path::Path;
use tracing::debug;

pub async fn open_target_source(
    argument: Option<&str>,
) -> Result<Box<dyn TargetSource>, DomainError> {
    let Some(argument) = argument else {
        debug!("Reading targets from stdin");
        return Ok(Box::new(LineStreamSource::stdin()));
    };

    if is_regular_file(argument).await {
        debug!(path = %argument, "Reading targets from file");
        let source = FileTargetSource::open(argument).await?;
        return Ok(Box::new(source));
    }

    debug!(target = %argument, "Argument is not a file, using it as a single target");
    Ok(Box::new(LiteralTargetSource::new(argument)))
}

async fn is_regular_file(path: impl AsRef<Path>) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
