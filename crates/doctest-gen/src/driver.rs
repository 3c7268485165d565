//! Driver file generation
//!
//! A driver is a translation unit that defines
//! `DOCTEST_CONFIG_IMPLEMENT_WITH_MAIN`, includes doctest itself, then
//! includes the header under test. Header paths are written relative to the
//! include root so the driver compiles with the include directory on the
//! search path.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Prefix stripped from header paths by default
pub const DEFAULT_INCLUDE_ROOT: &str = "../include/";

/// Framework header included by default
pub const DEFAULT_FRAMEWORK_HEADER: &str = "doctest.h";

/// Makes doctest emit its own `main` in the driver's translation unit
pub const IMPLEMENT_WITH_MAIN: &str = "DOCTEST_CONFIG_IMPLEMENT_WITH_MAIN";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0} path must not be empty")]
    EmptyPath(&'static str),

    #[error("failed to write driver file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings that shape the generated driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Prefix removed from the header path, once, when present
    pub include_root: String,
    /// Header providing the test framework
    pub framework_header: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            include_root: DEFAULT_INCLUDE_ROOT.to_string(),
            framework_header: DEFAULT_FRAMEWORK_HEADER.to_string(),
        }
    }
}

/// Header path as it appears in the driver's include directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPath(String);

impl HeaderPath {
    /// Normalise a caller-supplied header path against the include root.
    ///
    /// An empty `input` is an error here. Writing `#include ""` would only
    /// move the failure to the compiler.
    pub fn new(input: &str, include_root: &str) -> Result<Self, DriverError> {
        if input.is_empty() {
            return Err(DriverError::EmptyPath("input"));
        }

        let stripped = input.strip_prefix(include_root).unwrap_or(input);
        Ok(Self(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeaderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the driver source for a header.
///
/// Starts with a blank line and has no trailing newline.
pub fn render(header: &HeaderPath, config: &DriverConfig) -> String {
    format!(
        "\n#define {}\n#include \"{}\"\n\n#include \"{}\"",
        IMPLEMENT_WITH_MAIN, config.framework_header, header
    )
}

/// Write the driver for `input` to `output`, replacing any existing file.
///
/// Returns the header path used in the include directive.
pub fn generate(input: &str, output: &Path, config: &DriverConfig) -> Result<HeaderPath, DriverError> {
    if output.as_os_str().is_empty() {
        return Err(DriverError::EmptyPath("output"));
    }

    let header = HeaderPath::new(input, &config.include_root)?;
    debug!(input, header = %header, output = %output.display(), "resolved header path");

    let source = render(&header, config);
    fs::write(output, source).map_err(|source| DriverError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(output = %output.display(), "driver written");
    Ok(header)
}
