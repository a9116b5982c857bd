//! Response envelope and the opaque records carried inside it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result envelope used by every auth service response.
///
/// `output` is expected to be present exactly when `success` is true, but the
/// client does not enforce that. Absent `Option` fields decode as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleResult<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationInfo>,
}

// Manual impl: derive would require `T: Default`.
impl<T> Default for SingleResult<T> {
    fn default() -> Self {
        Self {
            success: false,
            message: None,
            error: None,
            output: None,
            validation: None,
        }
    }
}

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// Look up a top-level field.
            #[must_use]
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            #[must_use]
            pub fn as_value(&self) -> &Value {
                &self.0
            }

            #[must_use]
            pub fn into_value(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

opaque_record!(
    /// Error detail reported by the service, kept as sent whatever its shape.
    ErrorInfo
);

opaque_record!(
    /// Validation failures reported by the service, kept as sent.
    ValidationInfo
);

opaque_record!(
    /// The authenticated identity record. Its shape is owned by the service.
    Principal
);

opaque_record!(
    /// An organization record in the multi-tenant system.
    Tenant
);

impl ErrorInfo {
    /// The `code` field when it is a string.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(Value::as_str)
    }

    /// The `message` field when it is a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}

impl Principal {
    /// The `id` field when it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

impl Tenant {
    /// The `tenantCode` field when it is a string.
    #[must_use]
    pub fn tenant_code(&self) -> Option<&str> {
        self.0.get("tenantCode").and_then(Value::as_str)
    }
}
