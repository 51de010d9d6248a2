/*
[INPUT]:  ArgumentSpec from module info, operator edits, interface lookups
[OUTPUT]: ArgWidget input controls and their submitted text values
[POS]:    Form layer - one input control per module argument
[UPDATE]: When adding control kinds or changing value serialisation
*/

use interceptor_adapter::{ArgumentSpec, Interface};

use super::kind::ArgKind;
use crate::error::FormError;

/// Resolution state of an interface chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceOptions {
    /// Lookup dispatched, no answer yet
    Pending,
    Failed(String),
    Ready {
        options: Vec<Interface>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSelect {
    /// Interface name preferred once options arrive
    preferred: String,
    options: InterfaceOptions,
}

impl InterfaceSelect {
    fn new(preferred: &str) -> Self {
        Self {
            preferred: preferred.to_string(),
            options: InterfaceOptions::Pending,
        }
    }

    pub fn options(&self) -> &InterfaceOptions {
        &self.options
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.options, InterfaceOptions::Pending)
    }

    pub fn selected(&self) -> Option<&Interface> {
        match &self.options {
            InterfaceOptions::Ready {
                options,
                selected: Some(index),
            } => options.get(*index),
            _ => None,
        }
    }

    /// Install lookup results, preselecting the preferred name or the first option
    pub fn populate(&mut self, interfaces: Vec<Interface>) {
        let selected = interfaces
            .iter()
            .position(|interface| interface.name == self.preferred)
            .or(if interfaces.is_empty() { None } else { Some(0) });
        self.options = InterfaceOptions::Ready {
            options: interfaces,
            selected,
        };
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.options = InterfaceOptions::Failed(reason.into());
    }

    fn cycle(&mut self, forward: bool) {
        if let InterfaceOptions::Ready { options, selected } = &mut self.options {
            if options.is_empty() {
                return;
            }
            let len = options.len();
            let next = match (*selected, forward) {
                (None, _) => 0,
                (Some(index), true) => (index + 1) % len,
                (Some(index), false) => (index + len - 1) % len,
            };
            *selected = Some(next);
        }
    }

    fn choose(&mut self, name: &str) -> bool {
        match &mut self.options {
            InterfaceOptions::Ready { options, selected } => {
                match options.iter().position(|interface| interface.name == name) {
                    Some(index) => {
                        *selected = Some(index);
                        true
                    }
                    None => false,
                }
            }
            _ => {
                self.preferred = name.to_string();
                true
            }
        }
    }
}

/// Editable value of one argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Toggle(bool),
    Integer(String),
    Text(String),
    TextList(String),
    Interface(InterfaceSelect),
}

/// Input control bound to one module argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgWidget {
    name: String,
    type_name: String,
    kind: ArgKind,
    required: bool,
    control: Control,
}

impl ArgWidget {
    pub fn from_spec(spec: &ArgumentSpec) -> Self {
        let kind = ArgKind::from_type_name(&spec.type_name);
        let seed = spec.default_text();
        let control = match kind {
            ArgKind::Boolean => Control::Toggle(parse_flag(seed).unwrap_or(false)),
            ArgKind::Integer => Control::Integer(seed.to_string()),
            ArgKind::Text => Control::Text(seed.to_string()),
            ArgKind::TextList => Control::TextList(seed.to_string()),
            ArgKind::Interface => Control::Interface(InterfaceSelect::new(seed)),
        };

        Self {
            name: spec.name.clone(),
            type_name: spec.type_name.clone(),
            kind,
            required: spec.required,
            control,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub(crate) fn control_mut(&mut self) -> &mut Control {
        &mut self.control
    }

    pub fn interface_select(&self) -> Option<&InterfaceSelect> {
        match &self.control {
            Control::Interface(select) => Some(select),
            _ => None,
        }
    }

    pub fn interface_select_mut(&mut self) -> Option<&mut InterfaceSelect> {
        match &mut self.control {
            Control::Interface(select) => Some(select),
            _ => None,
        }
    }

    /// Text submitted for this argument
    ///
    /// Booleans serialise as `true`/`false`. An interface control has no
    /// value until its options have been populated.
    pub fn value(&self) -> Result<String, FormError> {
        match &self.control {
            Control::Toggle(checked) => Ok(checked.to_string()),
            Control::Integer(text) | Control::Text(text) | Control::TextList(text) => {
                Ok(text.clone())
            }
            Control::Interface(select) => match select.options() {
                InterfaceOptions::Pending => Err(FormError::Unresolved {
                    argument: self.name.clone(),
                }),
                InterfaceOptions::Failed(reason) => Err(FormError::NoSelection {
                    argument: self.name.clone(),
                    reason: reason.clone(),
                }),
                InterfaceOptions::Ready { .. } => select
                    .selected()
                    .map(|interface| interface.name.clone())
                    .ok_or_else(|| FormError::NoSelection {
                        argument: self.name.clone(),
                        reason: "no interfaces available".to_string(),
                    }),
            },
        }
    }

    /// Short rendering of the current value for list displays
    pub fn display_value(&self) -> String {
        match &self.control {
            Control::Toggle(true) => "[x]".to_string(),
            Control::Toggle(false) => "[ ]".to_string(),
            Control::Integer(text) | Control::Text(text) | Control::TextList(text) => text.clone(),
            Control::Interface(select) => match select.options() {
                InterfaceOptions::Pending => "loading interfaces...".to_string(),
                InterfaceOptions::Failed(reason) => format!("unavailable: {reason}"),
                InterfaceOptions::Ready { .. } => select
                    .selected()
                    .map(Interface::label)
                    .unwrap_or_else(|| "no interfaces".to_string()),
            },
        }
    }

    /// Keyboard character input; returns false when the control ignores it
    pub fn push_char(&mut self, ch: char) -> bool {
        match &mut self.control {
            Control::Integer(text) => {
                let sign = ch == '-' && text.is_empty();
                if ch.is_ascii_digit() || sign {
                    text.push(ch);
                    true
                } else {
                    false
                }
            }
            Control::Text(text) | Control::TextList(text) => {
                text.push(ch);
                true
            }
            Control::Toggle(_) | Control::Interface(_) => false,
        }
    }

    pub fn pop_char(&mut self) {
        if let Control::Integer(text) | Control::Text(text) | Control::TextList(text) =
            &mut self.control
        {
            text.pop();
        }
    }

    pub fn toggle(&mut self) {
        if let Control::Toggle(checked) = &mut self.control {
            *checked = !*checked;
        }
    }

    pub fn select_next(&mut self) {
        if let Control::Interface(select) = &mut self.control {
            select.cycle(true);
        }
    }

    pub fn select_previous(&mut self) {
        if let Control::Interface(select) = &mut self.control {
            select.cycle(false);
        }
    }

    /// Replace the value from operator-typed text (CLI `--arg`, prompts)
    pub fn set_text(&mut self, raw: &str) -> Result<(), FormError> {
        let argument = self.name.clone();
        match &mut self.control {
            Control::Toggle(checked) => {
                *checked = parse_flag(raw).ok_or_else(|| FormError::InvalidValue {
                    argument,
                    expected: "a boolean (true/false)",
                    value: raw.to_string(),
                })?;
            }
            Control::Integer(text) => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() && trimmed.parse::<i64>().is_err() {
                    return Err(FormError::InvalidValue {
                        argument,
                        expected: "an integer",
                        value: raw.to_string(),
                    });
                }
                *text = trimmed.to_string();
            }
            Control::Text(text) | Control::TextList(text) => *text = raw.to_string(),
            Control::Interface(select) => {
                if !select.choose(raw.trim()) {
                    return Err(FormError::InvalidValue {
                        argument,
                        expected: "a known interface name",
                        value: raw.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Parse operator boolean spellings; the service itself sends `True`/`False`
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, type_name: &str, default: &str) -> ArgumentSpec {
        ArgumentSpec {
            name: name.to_string(),
            type_name: type_name.to_string(),
            default: default.to_string(),
            required: false,
        }
    }

    fn interface(name: &str) -> Interface {
        Interface {
            name: name.to_string(),
            ipv4: Some("192.168.1.10".to_string()),
            mac: None,
        }
    }

    #[test]
    fn boolean_seeds_from_true_literal() {
        let checked = ArgWidget::from_spec(&spec("verbose", "bool", "True"));
        let unchecked = ArgWidget::from_spec(&spec("verbose", "bool", "False"));
        let absent = ArgWidget::from_spec(&spec("verbose", "bool", "None"));

        assert_eq!(checked.value().unwrap(), "true");
        assert_eq!(unchecked.value().unwrap(), "false");
        assert_eq!(absent.value().unwrap(), "false");
    }

    #[test]
    fn none_literal_seeds_empty_text() {
        let widget = ArgWidget::from_spec(&spec("targets", "list[str]", "None"));
        assert_eq!(widget.value().unwrap(), "");
    }

    #[test]
    fn integer_input_accepts_digits_only() {
        let mut widget = ArgWidget::from_spec(&spec("count", "int", ""));
        assert!(widget.push_char('-'));
        assert!(widget.push_char('4'));
        assert!(!widget.push_char('x'));
        assert!(!widget.push_char('-'));
        assert!(widget.push_char('2'));
        assert_eq!(widget.value().unwrap(), "-42");

        widget.pop_char();
        assert_eq!(widget.value().unwrap(), "-4");
    }

    #[test]
    fn interface_is_unresolved_until_populated() {
        let mut widget = ArgWidget::from_spec(&spec("iface", "Interface", "eth1"));
        assert_eq!(
            widget.value(),
            Err(FormError::Unresolved {
                argument: "iface".to_string()
            })
        );

        widget
            .interface_select_mut()
            .unwrap()
            .populate(vec![interface("eth0"), interface("eth1")]);
        assert_eq!(widget.value().unwrap(), "eth1");

        widget.select_next();
        assert_eq!(widget.value().unwrap(), "eth0");
        widget.select_previous();
        assert_eq!(widget.value().unwrap(), "eth1");
    }

    #[test]
    fn interface_without_matching_default_picks_first_option() {
        let mut widget = ArgWidget::from_spec(&spec("iface", "Interface", "None"));
        widget
            .interface_select_mut()
            .unwrap()
            .populate(vec![interface("wlan0"), interface("eth0")]);
        assert_eq!(widget.value().unwrap(), "wlan0");
    }

    #[test]
    fn failed_or_empty_lookup_blocks_submission() {
        let mut failed = ArgWidget::from_spec(&spec("iface", "Interface", ""));
        failed.interface_select_mut().unwrap().fail("timed out");
        assert!(matches!(failed.value(), Err(FormError::NoSelection { .. })));

        let mut empty = ArgWidget::from_spec(&spec("iface", "Interface", ""));
        empty.interface_select_mut().unwrap().populate(Vec::new());
        assert!(matches!(empty.value(), Err(FormError::NoSelection { .. })));
    }

    #[test]
    fn set_text_validates_typed_controls() {
        let mut flag = ArgWidget::from_spec(&spec("verbose", "bool", "False"));
        flag.set_text("yes").unwrap();
        assert_eq!(flag.value().unwrap(), "true");
        assert!(flag.set_text("maybe").is_err());

        let mut count = ArgWidget::from_spec(&spec("count", "int", "1"));
        assert!(count.set_text("ten").is_err());
        count.set_text(" 10 ").unwrap();
        assert_eq!(count.value().unwrap(), "10");

        let mut iface = ArgWidget::from_spec(&spec("iface", "Interface", ""));
        iface.set_text("eth1").unwrap();
        iface
            .interface_select_mut()
            .unwrap()
            .populate(vec![interface("eth0"), interface("eth1")]);
        assert_eq!(iface.value().unwrap(), "eth1");
        assert!(iface.set_text("ppp0").is_err());
    }

    #[test]
    fn toggle_flips_only_boolean_controls() {
        let mut flag = ArgWidget::from_spec(&spec("verbose", "bool", "True"));
        flag.toggle();
        assert_eq!(flag.value().unwrap(), "false");

        let mut text = ArgWidget::from_spec(&spec("target", "str", "a"));
        text.toggle();
        assert_eq!(text.value().unwrap(), "a");
    }
}
