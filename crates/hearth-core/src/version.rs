// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small semantic version type used for application identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An application version in `major.minor.patch[-pre]` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Incremented for incompatible changes.
    pub major: u64,
    /// Incremented for compatible additions.
    pub minor: u64,
    /// Incremented for fixes.
    pub patch: u64,
    /// Optional pre-release label, without the leading `-`.
    pub pre: Option<String>,
}

impl Version {
    /// Creates a release version.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }
}

/// An error produced when a version string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseVersionError {
    /// The string was empty.
    Empty,
    /// The string did not have exactly three numeric components.
    WrongComponentCount(usize),
    /// A numeric component could not be parsed.
    InvalidNumber(String),
    /// The pre-release label after `-` was empty.
    EmptyPreRelease,
}

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseVersionError::Empty => write!(f, "Version string is empty"),
            ParseVersionError::WrongComponentCount(count) => {
                write!(f, "Expected 3 version components, found {count}")
            }
            ParseVersionError::InvalidNumber(part) => {
                write!(f, "Version component '{part}' is not a number")
            }
            ParseVersionError::EmptyPreRelease => write!(f, "Pre-release label is empty"),
        }
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseVersionError::Empty);
        }

        let (core, pre) = match s.split_once('-') {
            Some((_, "")) => return Err(ParseVersionError::EmptyPreRelease),
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (s, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(ParseVersionError::WrongComponentCount(parts.len()));
        }

        let number = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| ParseVersionError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: number(parts[2])?,
            pre,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}
