//! doctest-gen - Test driver generation for doctest headers
//!
//! Usage: doctest-gen <INPUT> <OUTPUT>
//!
//! Writes a translation unit to OUTPUT that lets doctest provide `main` and
//! includes INPUT, so the tests declared inside the header get built and run.

use anyhow::{Context, Result};
use clap::builder::{NonEmptyStringValueParser, PathBufValueParser};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use doctest_gen::driver::{DEFAULT_FRAMEWORK_HEADER, DEFAULT_INCLUDE_ROOT};
use doctest_gen::{generate, DriverConfig};

#[derive(Parser)]
#[command(name = "doctest-gen")]
#[command(about = "Generate a doctest driver source for a C++ header")]
#[command(version)]
#[command(after_help = r#"OUTPUT:
    (blank line)
    #define DOCTEST_CONFIG_IMPLEMENT_WITH_MAIN
    #include "doctest.h"
    (blank line)
    #include "<INPUT without include root>"

EXAMPLES:
    doctest-gen ../include/widget.h widget_test.cpp
    doctest-gen local/thing.h thing_test.cpp
"#)]
struct Cli {
    /// Header under test
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    input: String,

    /// Driver file to create or overwrite
    #[arg(value_parser = PathBufValueParser::new())]
    output: PathBuf,

    /// Prefix stripped from INPUT when present
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_INCLUDE_ROOT)]
    include_root: String,

    /// Test framework header to include
    #[arg(long, value_name = "HEADER", default_value = DEFAULT_FRAMEWORK_HEADER)]
    framework_header: String,
}

impl Cli {
    fn config(&self) -> DriverConfig {
        DriverConfig {
            include_root: self.include_root.clone(),
            framework_header: self.framework_header.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let header = generate(&cli.input, &cli.output, &cli.config())
        .with_context(|| format!("Failed to generate test driver for {}", cli.input))?;

    println!("add test for {}", header);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["doctest-gen", "../include/widget.h", "widget_test.cpp"]).unwrap();
        let config = cli.config();

        assert_eq!(cli.input, "../include/widget.h");
        assert_eq!(cli.output, PathBuf::from("widget_test.cpp"));
        assert_eq!(config.include_root, "../include/");
        assert_eq!(config.framework_header, "doctest.h");
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["doctest-gen", "../include/widget.h"]).is_err());
        assert!(Cli::try_parse_from(["doctest-gen"]).is_err());
    }

    #[test]
    fn test_empty_argument_is_rejected() {
        assert!(Cli::try_parse_from(["doctest-gen", "", "out.cpp"]).is_err());
        assert!(Cli::try_parse_from(["doctest-gen", "widget.h", ""]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_output_path() {
        use std::os::unix::ffi::OsStrExt;

        let output = OsStr::from_bytes(b"driver_\xff.cpp");
        let cli = Cli::try_parse_from([OsStr::new("doctest-gen"), OsStr::new("widget.h"), output]).unwrap();

        assert_eq!(cli.output.as_os_str(), output);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "doctest-gen",
            "src/args.hh",
            "args_test.cpp",
            "--include-root",
            "src/",
            "--framework-header",
            "doctest/doctest.h",
        ])
        .unwrap();

        assert_eq!(cli.config().include_root, "src/");
        assert_eq!(cli.config().framework_header, "doctest/doctest.h");
    }

    #[test]
    fn test_run_writes_file() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("thing_test.cpp");
        let cli = Cli::try_parse_from([
            OsStr::new("doctest-gen"),
            OsStr::new("local/thing.h"),
            output.as_os_str(),
        ])
        .unwrap();

        run(&cli).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.ends_with("#include \"local/thing.h\""));
    }

    #[test]
    fn test_run_reports_unwritable_output() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("no").join("such").join("dir.cpp");
        let cli = Cli::try_parse_from([OsStr::new("doctest-gen"), OsStr::new("widget.h"), output.as_os_str()]).unwrap();

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("widget.h"));
    }
}
