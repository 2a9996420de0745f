use crate::Target;
use std::fmt;
use std::net::IpAddr;

/// What a lookup produced for one target.
///
/// An empty list is returned both for a genuinely empty answer and for a
/// lookup that failed; callers cannot and should not tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Forward {
        target: Target,
        addresses: Vec<IpAddr>,
    },
    Reverse {
        target: Target,
        names: Vec<String>,
    },
}

impl LookupOutcome {
    /// Builds a forward outcome, dropping every address whose text contains
    /// a colon unless IPv6 is included. IPv4-mapped addresses count as IPv4.
    pub fn forward(target: Target, addresses: Vec<IpAddr>, include_ipv6: bool) -> Self {
        let addresses = addresses
            .into_iter()
            .map(|ip| ip.to_canonical())
            .filter(|ip| include_ipv6 || !ip.to_string().contains(':'))
            .collect();

        LookupOutcome::Forward { target, addresses }
    }

    /// Builds a reverse outcome with the root-domain dot removed from each name.
    pub fn reverse(target: Target, names: Vec<String>) -> Self {
        let names = names
            .into_iter()
            .map(|name| strip_root_dot(&name).to_string())
            .collect();

        LookupOutcome::Reverse { target, names }
    }

    pub fn target(&self) -> &Target {
        match self {
            LookupOutcome::Forward { target, .. } | LookupOutcome::Reverse { target, .. } => {
                target
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LookupOutcome::Forward { addresses, .. } => addresses.is_empty(),
            LookupOutcome::Reverse { names, .. } => names.is_empty(),
        }
    }

    /// One line per value in resolver order, or a single bare line when empty.
    pub fn into_lines(self) -> Vec<ResultLine> {
        match self {
            LookupOutcome::Forward { target, addresses } => {
                if addresses.is_empty() {
                    return vec![ResultLine::Forward {
                        target,
                        address: None,
                    }];
                }
                addresses
                    .into_iter()
                    .map(|address| ResultLine::Forward {
                        target: target.clone(),
                        address: Some(address),
                    })
                    .collect()
            }
            LookupOutcome::Reverse { target, names } => {
                if names.is_empty() {
                    return vec![ResultLine::Reverse { target, name: None }];
                }
                names
                    .into_iter()
                    .map(|name| ResultLine::Reverse {
                        target: target.clone(),
                        name: Some(name),
                    })
                    .collect()
            }
        }
    }
}

/// A printable result: `target:address` for forward lookups and
/// `name:target` for reverse lookups. Missing values leave their side empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLine {
    Forward {
        target: Target,
        address: Option<IpAddr>,
    },
    Reverse {
        target: Target,
        name: Option<String>,
    },
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLine::Forward {
                target,
                address: Some(address),
            } => write!(f, "{}:{}", target, address),
            ResultLine::Forward {
                target,
                address: None,
            } => write!(f, "{}:", target),
            ResultLine::Reverse {
                target,
                name: Some(name),
            } => write!(f, "{}:{}", name, target),
            ResultLine::Reverse { target, name: None } => write!(f, ":{}", target),
        }
    }
}

/// Removes exactly one trailing `.` if present.
pub fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
