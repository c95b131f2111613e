use std::{fmt, str::FromStr};

use crate::errors::SettingsError;

/// A named connection string handed in by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStringEntry {
    pub name: String,
    pub value: String,
}

impl ConnectionStringEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for ConnectionStringEntry {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Parses `name=value`, splitting on the first `=`.
impl FromStr for ConnectionStringEntry {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) => Ok(Self::new(name, value)),
            None => Err(SettingsError::InvalidEntry(format!("expected NAME=VALUE, got `{s}`"))),
        }
    }
}

impl fmt::Display for ConnectionStringEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
