use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// A single lookup target: a hostname or an IP literal, trimmed on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    value: Arc<str>,
}

impl Target {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self {
            value: value.as_ref().trim().into(),
        }
    }

    /// Builds a target from one line of input. Blank lines yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            value: trimmed.into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> LookupKind {
        LookupKind::classify(&self.value)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::new(value)
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Target::new(value)
    }
}

/// Route chosen for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKind {
    /// Hostname to addresses.
    Forward,
    /// Address literal to hostnames.
    Reverse(IpAddr),
}

impl LookupKind {
    /// Anything that parses as an IPv4 or IPv6 literal goes the reverse way,
    /// everything else (including malformed addresses) is a hostname.
    pub fn classify(target: &str) -> Self {
        match target.parse::<IpAddr>() {
            Ok(ip) => LookupKind::Reverse(ip),
            Err(_) => LookupKind::Forward,
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, LookupKind::Reverse(_))
    }
}
