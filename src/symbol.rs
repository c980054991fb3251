use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::error::DlError;

/// Upper-cased ticker symbol, e.g. `KO`, `BRK.B`, `^GSPC`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl FromStr for Symbol {
    type Err = DlError;
    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(DlError::Invalid {
                code: "MISSING_SYMBOL",
                message: "Symbol is required".to_string(),
            });
        }

        // Symbols become URL path segments
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
        {
            return Err(DlError::Invalid {
                code: "INVALID_SYMBOL",
                message: format!("Invalid symbol '{s}'"),
            });
        }

        Ok(Self(s.to_uppercase()))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
