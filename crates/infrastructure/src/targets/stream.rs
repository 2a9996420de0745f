use async_trait::async_trait;
use resolve_application::ports::TargetSource;
use resolve_domain::{DomainError, Target};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Targets read lazily, one line at a time, from any buffered reader.
///
/// Lines are only pulled when the dispatcher asks for the next target, so a
/// slow producer on stdin is consumed at the pace lookups complete. Lines
/// that are not valid UTF-8 are decoded lossily, the same as file input.
pub struct LineStreamSource<R> {
    label: String,
    reader: R,
    buf: Vec<u8>,
}

impl<R> LineStreamSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(label: impl Into<String>, reader: R) -> Self {
        Self {
            label: label.into(),
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl LineStreamSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R> TargetSource for LineStreamSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_target(&mut self) -> Result<Option<Target>, DomainError> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .await
                .map_err(|e| DomainError::TargetSourceError {
                    source_name: self.label.clone(),
                    message: e.to_string(),
                })?;

            if read == 0 {
                return Ok(None);
            }

            if let Some(target) = Target::from_line(&String::from_utf8_lossy(&self.buf)) {
                return Ok(Some(target));
            }
        }
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
