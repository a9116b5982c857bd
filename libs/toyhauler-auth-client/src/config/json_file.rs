use std::{fs, io, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use super::ConfigError;
use crate::paths::ensure_absolute;

/// Read and deserialize a JSON file.
///
/// A missing file, or one containing only whitespace, yields `Ok(None)`.
/// With `allow_comments` the text is parsed as JSON5, which accepts `//` and
/// `/* */` comments.
///
/// # Errors
///
/// - [`ConfigError::PathNotAbsolute`] if `path` is relative
/// - [`ConfigError::Io`] on read failures other than "not found"
/// - [`ConfigError::Parse`] if the text is not valid for `T`
pub fn read_json_file<T: DeserializeOwned>(
    path: &Path,
    allow_comments: bool,
) -> Result<Option<T>, ConfigError> {
    ensure_absolute(path)?;

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if text.trim().is_empty() {
        tracing::debug!(path = %path.display(), "config file is empty");
        return Ok(None);
    }

    let parsed: Result<T, Box<dyn std::error::Error + Send + Sync>> = if allow_comments {
        json5::from_str(&text).map_err(Into::into)
    } else {
        serde_json::from_str(&text).map_err(Into::into)
    };

    parsed.map(Some).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `subject` as two-space-indented JSON and write it to `path`,
/// creating missing parent directories.
///
/// # Errors
///
/// - [`ConfigError::PathNotAbsolute`] if `path` is relative
/// - [`ConfigError::Serialize`] if `subject` cannot be encoded
/// - [`ConfigError::Io`] on directory creation or write failures
pub fn write_json_file<T: Serialize>(subject: &T, path: &Path) -> Result<(), ConfigError> {
    ensure_absolute(path)?;

    let text = serde_json::to_string_pretty(subject)
        .map_err(|source| ConfigError::Serialize { source })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "config file written");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        port: Option<u16>,
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let result: Option<Sample> =
            read_json_file(&dir.path().join("absent.json"), false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn whitespace_only_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n\t ").unwrap();

        let result: Option<Sample> = read_json_file(&path, false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn strict_json_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"name":"svc","port":8080}"#).unwrap();

        let result: Sample = read_json_file(&path, false).unwrap().unwrap();
        assert_eq!(
            result,
            Sample {
                name: "svc".to_owned(),
                port: Some(8080)
            }
        );
    }

    #[test]
    fn comments_rejected_in_strict_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{\n  // comment\n  \"name\": \"svc\"\n}").unwrap();

        let err = read_json_file::<Sample>(&path, false).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn comments_accepted_when_allowed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            "{\n  // line comment\n  \"name\": \"svc\", /* block */\n  \"port\": 1\n}",
        )
        .unwrap();

        let result: Sample = read_json_file(&path, true).unwrap().unwrap();
        assert_eq!(result.name, "svc");
        assert_eq!(result.port, Some(1));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_json_file::<Sample>(&path, false),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn relative_path_rejected_before_io() {
        let err = read_json_file::<Sample>(Path::new("cfg.json"), false).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotAbsolute(p) if p == PathBuf::from("cfg.json")));

        let err = write_json_file(
            &Sample {
                name: "x".to_owned(),
                port: None,
            },
            Path::new("cfg.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::PathNotAbsolute(_)));
    }

    #[test]
    fn write_creates_parents_and_indents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cfg.json");
        let sample = Sample {
            name: "svc".to_owned(),
            port: None,
        };

        write_json_file(&sample, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"name\": \"svc\""), "got: {text}");
        let back: Sample = read_json_file(&path, false).unwrap().unwrap();
        assert_eq!(back, sample);
    }
}
