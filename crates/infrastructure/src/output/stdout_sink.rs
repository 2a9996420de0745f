use resolve_application::ports::ResultSink;
use resolve_domain::{DomainError, ResultLine};
use std::io::{self, Write};

/// Writes result lines to stdout.
///
/// Each call holds the stdout lock for all lines of one target, so the lines
/// of concurrent lookups never interleave.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl ResultSink for StdoutSink {
    fn emit(&self, lines: &[ResultLine]) -> Result<(), DomainError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_lines(&mut handle, lines)
    }
}

pub fn write_lines<W: Write>(writer: &mut W, lines: &[ResultLine]) -> Result<(), DomainError> {
    for line in lines {
        writeln!(writer, "{}", line).map_err(|e| DomainError::OutputError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DomainError::OutputError(e.to_string()))
}
