//! Dependency kinds
//!
//! The four kinds of dependencies a discovery log can propose, and
//! their mapping to the tokens the discovery tool prints.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::errors::ValidationError;

/// The kind of a dependency candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Unique column (UCC)
    Unique,
    /// Order dependency (OD)
    Order,
    /// Inclusion dependency (IND)
    Inclusion,
    /// Functional dependency (FD)
    Functional,
}

impl DependencyKind {
    /// All kinds, in declaration order
    pub const ALL: [DependencyKind; 4] = [
        DependencyKind::Unique,
        DependencyKind::Order,
        DependencyKind::Inclusion,
        DependencyKind::Functional,
    ];

    /// Map a log token to its kind
    pub fn from_token(token: &str) -> Result<Self, ValidationError> {
        match token {
            "UCC" => Ok(DependencyKind::Unique),
            "OD" => Ok(DependencyKind::Order),
            "IND" => Ok(DependencyKind::Inclusion),
            "FD" => Ok(DependencyKind::Functional),
            other => Err(ValidationError::UnknownCandidateKind(other.to_string())),
        }
    }

    /// The token the discovery tool uses for this kind
    pub fn token(&self) -> &'static str {
        match self {
            DependencyKind::Unique => "UCC",
            DependencyKind::Order => "OD",
            DependencyKind::Inclusion => "IND",
            DependencyKind::Functional => "FD",
        }
    }
}

impl FromStr for DependencyKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyKind::from_token(s)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
