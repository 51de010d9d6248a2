/*
[INPUT]:  Host rows picked up by the operator, form widgets as drop targets
[OUTPUT]: DragPayload and the drop rules of text and list widgets
[POS]:    Interaction layer - copy a host identifier into a module argument
[UPDATE]: When adding drag sources or changing drop semantics
*/

use interceptor_adapter::Host;
use tracing::debug;

use crate::error::TransferError;
use crate::form::{ArgWidget, Control};

/// Plain text carried from a drag source to a drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    raw: String,
}

impl DragPayload {
    pub fn from_host(host: &Host) -> Self {
        Self {
            raw: host.id.clone(),
        }
    }

    /// Payload taken from a rendered row label such as `7 (10.0.0.7)`
    pub fn from_label(label: &str) -> Self {
        Self {
            raw: label.to_string(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Value a receiver inserts: the first whitespace-delimited token
    pub fn token(&self) -> Option<&str> {
        self.raw.split_whitespace().next()
    }
}

impl ArgWidget {
    /// Drop `payload` onto this widget and return the resulting value
    ///
    /// List inputs append with a comma separator; plain text inputs are replaced.
    pub fn accept_drop(&mut self, payload: &DragPayload) -> Result<String, TransferError> {
        if !self.kind().accepts_drop() {
            return Err(self.rejection());
        }
        let token = payload.token().ok_or(TransferError::EmptyPayload)?;

        let dropped = match self.control_mut() {
            Control::TextList(text) => {
                if text.is_empty() {
                    *text = token.to_string();
                } else {
                    text.push(',');
                    text.push_str(token);
                }
                Some(text.clone())
            }
            Control::Text(text) => {
                *text = token.to_string();
                Some(text.clone())
            }
            _ => None,
        };
        let value = dropped.ok_or_else(|| self.rejection())?;
        debug!(argument = %self.name(), value = %value, "dropped value onto argument");
        Ok(value)
    }

    fn rejection(&self) -> TransferError {
        TransferError::Rejected {
            argument: self.name().to_string(),
            type_name: self.type_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interceptor_adapter::ArgumentSpec;

    fn widget(type_name: &str, default: &str) -> ArgWidget {
        ArgWidget::from_spec(&ArgumentSpec {
            name: "targets".to_string(),
            type_name: type_name.to_string(),
            default: default.to_string(),
            required: false,
        })
    }

    fn host(id: &str) -> Host {
        Host {
            id: id.to_string(),
            ipv4: Some("10.0.0.7".to_string()),
            ipv6: None,
            mac: None,
        }
    }

    #[test]
    fn list_drop_appends_with_comma() {
        let mut list = widget("list[str]", "a");
        assert_eq!(list.accept_drop(&DragPayload::from_host(&host("7"))), Ok("a,7".to_string()));
        assert_eq!(list.value().unwrap(), "a,7");
    }

    #[test]
    fn list_drop_into_empty_value_has_no_separator() {
        let mut list = widget("list", "None");
        assert_eq!(list.accept_drop(&DragPayload::from_host(&host("7"))), Ok("7".to_string()));
    }

    #[test]
    fn text_drop_replaces_value() {
        let mut text = widget("str", "old");
        text.accept_drop(&DragPayload::from_host(&host("7"))).unwrap();
        assert_eq!(text.value().unwrap(), "7");

        let mut empty = widget("str", "");
        empty.accept_drop(&DragPayload::from_host(&host("7"))).unwrap();
        assert_eq!(empty.value().unwrap(), "7");
    }

    #[test]
    fn receiver_takes_first_token_of_label() {
        let mut text = widget("str", "");
        text.accept_drop(&DragPayload::from_label("  12 (10.0.0.12)  ")).unwrap();
        assert_eq!(text.value().unwrap(), "12");
    }

    #[test]
    fn typed_controls_reject_drops() {
        for type_name in ["int", "bool", "Interface"] {
            let mut target = widget(type_name, "");
            let before = target.clone();
            assert!(matches!(
                target.accept_drop(&DragPayload::from_host(&host("7"))),
                Err(TransferError::Rejected { .. })
            ));
            assert_eq!(target, before);
        }
    }

    #[test]
    fn blank_payload_is_rejected() {
        let mut text = widget("str", "keep");
        assert_eq!(
            text.accept_drop(&DragPayload::from_label("   ")),
            Err(TransferError::EmptyPayload)
        );
        assert_eq!(text.value().unwrap(), "keep");
    }
}
