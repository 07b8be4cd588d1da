//! Tracing setup

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// The dashboard owns the terminal, so without a log file only errors reach
/// stderr. `RUST_LOG` still takes precedence.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let mut env_filter =
        EnvFilter::from_default_env().add_directive(default_level(log_file.is_some()).into());
    for directive in verbose_directives(verbose) {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Floor applied when `RUST_LOG` says nothing: warnings only reach a file
fn default_level(to_file: bool) -> Level {
    if to_file {
        Level::WARN
    } else {
        Level::ERROR
    }
}

fn verbose_directives(verbose: u8) -> Vec<String> {
    let level = match verbose {
        0 => return Vec::new(),
        1 => "debug",
        _ => "trace",
    };
    ["obdhud_core", "obdhud"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stderr_floor_is_error() {
        assert_eq!(default_level(false), Level::ERROR);
    }

    #[test]
    fn test_log_file_floor_is_warn() {
        assert_eq!(default_level(true), Level::WARN);
    }

    #[test]
    fn test_verbose_directives() {
        assert!(verbose_directives(0).is_empty());
        assert_eq!(
            verbose_directives(1),
            vec!["obdhud_core=debug".to_string(), "obdhud=debug".to_string()]
        );
        assert_eq!(
            verbose_directives(3),
            vec!["obdhud_core=trace".to_string(), "obdhud=trace".to_string()]
        );
    }
}
