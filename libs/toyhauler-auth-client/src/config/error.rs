use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, reading or writing the client configuration.
///
/// A missing config file is not an error; loaders report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOME environment variable is not set")]
    HomeMissing,

    /// The path is still relative after `~` expansion.
    #[error("config path must be absolute (after ~ expansion): {}", .0.display())]
    PathNotAbsolute(PathBuf),

    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but its contents are not valid JSON for the target shape.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to serialize config: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn path_not_absolute_renders_path() {
        let e = ConfigError::PathNotAbsolute(PathBuf::from("relative/config.json"));
        assert_eq!(
            e.to_string(),
            "config path must be absolute (after ~ expansion): relative/config.json"
        );
    }

    #[test]
    fn parse_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = ConfigError::Parse {
            path: PathBuf::from("/etc/config.json"),
            source: Box::new(source),
        };
        assert!(e.to_string().starts_with("failed to parse config file /etc/config.json: "));
        assert!(std::error::Error::source(&e).is_some());
    }
}
