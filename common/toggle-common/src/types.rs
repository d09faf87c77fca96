use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToggleError;

/// Who is credited for a state that no caller has set.
pub const SYSTEM_ACTOR: &str = "system";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    On,
    #[default]
    Off,
}

impl SystemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemStatus::On => "on",
            SystemStatus::Off => "off",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemStatus {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(SystemStatus::On),
            "off" => Ok(SystemStatus::Off),
            _ => Err(ToggleError::InvalidStatus),
        }
    }
}

/// Body of `GET /state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    pub status: SystemStatus,
    pub last_updated: String,
    pub updated_by: String,
}

impl StateReport {
    /// The report served when nothing is stored: always `off`, credited to the system.
    pub fn system_default(last_updated: String) -> Self {
        Self {
            status: SystemStatus::Off,
            last_updated,
            updated_by: SYSTEM_ACTOR.to_string(),
        }
    }
}

/// Body of a successful `POST /state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    pub success: bool,
    pub status: SystemStatus,
    pub last_updated: String,
    pub message: String,
}

impl StateChange {
    pub fn applied(status: SystemStatus, last_updated: String) -> Self {
        Self {
            success: true,
            status,
            last_updated,
            message: format!("System turned {status}"),
        }
    }
}

/// Raw `POST /state` payload. Fields are kept as loose JSON and only
/// `status` is checked, by [`StateUpdate::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateUpdate {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl StateUpdate {
    /// Parse a request body. Anything other than a JSON object is an invalid status.
    pub fn from_slice(body: &[u8]) -> Result<Self, ToggleError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ToggleError::InvalidStatus)?;
        if !value.is_object() {
            return Err(ToggleError::InvalidStatus);
        }
        serde_json::from_value(value).map_err(|_| ToggleError::InvalidStatus)
    }

    /// Returns the requested status and the caller's timestamp.
    ///
    /// Only a non-empty string timestamp is kept; any other value means "now".
    pub fn validate(self) -> Result<(SystemStatus, Option<String>), ToggleError> {
        let status = self
            .status
            .as_ref()
            .and_then(Value::as_str)
            .ok_or(ToggleError::InvalidStatus)?
            .parse()?;
        let timestamp = match self.timestamp {
            Some(Value::String(ts)) if !ts.is_empty() => Some(ts),
            _ => None,
        };
        Ok((status, timestamp))
    }
}
