/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-12 Accept numeric ids and non-string argument defaults
*/

use serde::{Deserialize, Serialize};

/// Literal the service sends for an argument without a default
pub const NO_DEFAULT_LITERAL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_text")]
    pub description: String,
    #[serde(default)]
    pub args: Vec<ArgumentSpec>,
}

/// One argument of a module's `run` signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(rename = "type", default = "default_type_name")]
    pub type_name: String,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_text")]
    pub default: String,
    #[serde(default)]
    pub required: bool,
}

impl ArgumentSpec {
    /// Default value as text, with the service's "no default" literal mapped to empty
    pub fn default_text(&self) -> &str {
        if self.default == NO_DEFAULT_LITERAL {
            ""
        } else {
            &self.default
        }
    }
}

fn default_type_name() -> String {
    "str".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub name: String,
}

/// Snapshot of a task as reported by `GET /tasks/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub name: String,
    pub running: bool,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_text")]
    pub full_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(deserialize_with = "serde_helpers::deserialize_text")]
    pub id: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

impl Host {
    /// Preferred address for display: ipv4, then ipv6, then mac
    pub fn display_address(&self) -> Option<&str> {
        [&self.ipv4, &self.ipv6, &self.mac]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    /// List label, e.g. `7 (10.0.0.7)`
    pub fn label(&self) -> String {
        match self.display_address() {
            Some(address) => format!("{} ({})", self.id, address),
            None => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

impl Interface {
    pub fn label(&self) -> String {
        format!(
            "{} ({}, {})",
            self.name,
            self.ipv4.as_deref().unwrap_or("-"),
            self.mac.as_deref().unwrap_or("-")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "serde_helpers::deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_text")]
    pub host_id: String,
    #[serde(default)]
    pub transport_protocol: Option<String>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(deserialize_with = "serde_helpers::deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_text")]
    pub service_id: String,
    #[serde(default)]
    pub login_name: Option<String>,
    #[serde(default)]
    pub credential: Option<String>,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept strings, numbers, booleans and null, keeping the text rendering
    pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Number(number) => number.to_string(),
            other => other.to_string(),
        })
    }
}
