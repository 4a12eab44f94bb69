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

//! Build metadata captured from the calling crate.

use hearth_core::{BuildError, Version};
use std::path::Path;

/// The name and version of the crate an application is built from.
///
/// Usually captured with [`application_metadata!`](crate::application_metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationMetadata {
    name: String,
    version: String,
}

impl ApplicationMetadata {
    /// Creates metadata from a name and an unparsed version string.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The crate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses the captured version string.
    pub fn version(&self) -> Result<Version, BuildError> {
        self.version
            .parse()
            .map_err(|reason| BuildError::InvalidVersion {
                value: self.version.clone(),
                reason,
            })
    }
}

/// Captures the calling crate's `CARGO_PKG_NAME` and `CARGO_PKG_VERSION`.
///
/// ```rust
/// let metadata = hearth_sdk::application_metadata!();
/// assert!(!metadata.name().is_empty());
/// ```
#[macro_export]
macro_rules! application_metadata {
    () => {
        $crate::ApplicationMetadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
}

/// The file stem of the running executable, if it can be determined.
pub(crate) fn executable_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    file_stem(&exe)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_parsed_lazily() {
        let good = ApplicationMetadata::new("viewer", "0.3.1");
        let bad = ApplicationMetadata::new("viewer", "three");

        assert_eq!(good.version().unwrap(), Version::new(0, 3, 1));
        assert!(matches!(
            bad.version(),
            Err(BuildError::InvalidVersion { value, .. }) if value == "three"
        ));
    }

    #[test]
    fn test_file_stem_drops_directories_and_extension() {
        assert_eq!(
            file_stem(Path::new("/opt/bin/viewer.exe")).as_deref(),
            Some("viewer")
        );
        assert_eq!(file_stem(Path::new("/")), None);
    }
}
