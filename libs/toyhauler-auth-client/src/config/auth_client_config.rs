use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigLoader};

/// Default folder holding the client config file.
pub const CONFIG_FOLDER_PATH: &str = "~/.config/toyhauler-auth-client";
/// Config file name inside [`CONFIG_FOLDER_PATH`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk configuration read by [`AuthClient`](crate::AuthClient).
///
/// ```json
/// { "authApiBaseUrl": "https://auth.example.com" }
/// ```
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_api_base_url: Option<String>,
}

impl AuthClientConfig {
    /// Loader bound to `~/.config/toyhauler-auth-client/config.json`.
    #[must_use]
    pub fn loader() -> ConfigLoader<Self> {
        ConfigLoader::new(CONFIG_FOLDER_PATH, CONFIG_FILE_NAME)
    }

    /// Load the well-known config file.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::loader().load()
    }
}
