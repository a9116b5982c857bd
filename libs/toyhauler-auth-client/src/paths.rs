//! Home-directory expansion and absolute-path checks for config files.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::config::ConfigError;

/// Expand a leading `~` to the user home directory.
///
/// `~` and `~/rest` are expanded; any other path (including `~user/..`) is
/// returned unchanged. Relative paths therefore stay relative.
/// On Windows, uses `USERPROFILE` or `HOME`; elsewhere `HOME`.
///
/// # Errors
///
/// Returns [`ConfigError::HomeMissing`] if expansion is needed and the home
/// variable is unset.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "windows")]
    let rest = raw
        .strip_prefix("~/")
        .or_else(|| raw.strip_prefix("~\\"))
        .or_else(|| (raw == "~").then_some(""));

    #[cfg(not(target_os = "windows"))]
    let rest = raw
        .strip_prefix("~/")
        .or_else(|| (raw == "~").then_some(""));

    match rest {
        Some(rest) => {
            let home = home_dir()?;
            if rest.is_empty() {
                Ok(home)
            } else {
                Ok(home.join(rest))
            }
        }
        None => Ok(PathBuf::from(raw)),
    }
}

/// Expand `~` and require the result to be absolute.
///
/// # Errors
///
/// Returns [`ConfigError::PathNotAbsolute`] for paths that are still relative
/// after expansion, or [`ConfigError::HomeMissing`] from [`expand_tilde`].
pub fn resolve_absolute(raw: &str) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(raw)?;
    ensure_absolute(&expanded)?;
    Ok(expanded)
}

pub(crate) fn ensure_absolute(path: &Path) -> Result<(), ConfigError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(ConfigError::PathNotAbsolute(path.to_path_buf()))
    }
}

// `var_os` keeps non-UTF-8 home directories intact.
fn home_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "windows")]
    let home = env::var_os("USERPROFILE").or_else(|| env::var_os("HOME"));

    #[cfg(not(target_os = "windows"))]
    let home = env::var_os("HOME");

    home.map(PathBuf::from).ok_or(ConfigError::HomeMissing)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn expand_tilde_with_path() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            let result = expand_tilde("~/.config/toyhauler-auth-client/config.json").unwrap();
            assert_eq!(
                result,
                tmp.path().join(".config/toyhauler-auth-client/config.json")
            );
        });
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn expand_tilde_only() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            assert_eq!(expand_tilde("~").unwrap(), tmp.path());
        });
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn absolute_path_unchanged() {
        let result = expand_tilde("/etc/toyhauler/config.json").unwrap();
        assert_eq!(result, PathBuf::from("/etc/toyhauler/config.json"));
    }

    #[test]
    fn relative_path_unchanged_by_expansion() {
        assert_eq!(
            expand_tilde("relative/config.json").unwrap(),
            PathBuf::from("relative/config.json")
        );
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn tilde_user_form_not_expanded() {
        assert_eq!(expand_tilde("~bob/x").unwrap(), PathBuf::from("~bob/x"));
    }

    #[test]
    fn resolve_absolute_rejects_relative() {
        let err = resolve_absolute("relative/config.json").unwrap_err();
        match err {
            ConfigError::PathNotAbsolute(p) => assert_eq!(p, PathBuf::from("relative/config.json")),
            other => panic!("Expected PathNotAbsolute, got {other:?}"),
        }
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn resolve_absolute_expands_home() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            let result = resolve_absolute("~/cfg.json").unwrap();
            assert!(result.is_absolute());
            assert!(result.starts_with(tmp.path()));
        });
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn error_when_home_missing() {
        temp_env::with_var_unset("HOME", || {
            let err = expand_tilde("~/cfg.json").unwrap_err();
            assert!(matches!(err, ConfigError::HomeMissing), "got {err:?}");
        });
    }
}
