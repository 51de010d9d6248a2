/*
[INPUT]:  Argument type names reported by module info
[OUTPUT]: ArgKind control classification
[POS]:    Form layer - type name to control mapping
[UPDATE]: When the service introduces new argument types
*/

use tracing::debug;

/// Control family chosen for an argument type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// `bool`: on/off toggle
    Boolean,
    /// `int`: digit entry
    Integer,
    /// `str` and unrecognised names: free text
    Text,
    /// `list...`: comma separated text
    TextList,
    /// `Interface`: choice among local network interfaces
    Interface,
}

impl ArgKind {
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name.trim() {
            "bool" => ArgKind::Boolean,
            "int" => ArgKind::Integer,
            "str" => ArgKind::Text,
            "Interface" => ArgKind::Interface,
            other if other.starts_with("list") => ArgKind::TextList,
            other => {
                debug!(type_name = other, "unrecognised argument type; using text input");
                ArgKind::Text
            }
        }
    }

    /// Whether a dragged value may be dropped onto this control
    pub fn accepts_drop(self) -> bool {
        matches!(self, ArgKind::Text | ArgKind::TextList)
    }
}
