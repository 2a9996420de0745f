use resolve_domain::{DomainError, ResultLine};

pub trait ResultSink: Send + Sync {
    /// Writes the lines of one target. Lines must never interleave with
    /// lines written concurrently by other tasks.
    fn emit(&self, lines: &[ResultLine]) -> Result<(), DomainError>;
}
