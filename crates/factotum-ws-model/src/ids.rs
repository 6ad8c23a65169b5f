// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CODE_MAX_LEN: usize = 256;
pub const DTXSID_PREFIX: &str = "DTXSID";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

fn check_token(field: &'static str, input: &str) -> Result<(), ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty(field));
    }
    if input.trim() != input {
        return Err(ParseError::Trimmed(field));
    }
    if input.len() > CODE_MAX_LEN {
        return Err(ParseError::TooLong(field, CODE_MAX_LEN));
    }
    Ok(())
}

/// DSSTox substance identifier, e.g. `DTXSID6026296`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Dtxsid(String);

impl Dtxsid {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        check_token("dtxsid", input)?;
        let digits = input
            .strip_prefix(DTXSID_PREFIX)
            .ok_or(ParseError::InvalidFormat("dtxsid must start with DTXSID"))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(
                "dtxsid must be DTXSID followed by digits",
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Dtxsid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// CAS registry number as extracted; raw values are not always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct CasNumber(String);

impl CasNumber {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        check_token("cas", input)?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Upc(String);

impl Upc {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        check_token("upc", input)?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
