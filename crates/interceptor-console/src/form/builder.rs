/*
[INPUT]:  Module info (name, description, argument specs)
[OUTPUT]: ModuleForm with ordered widgets, focus and submission collection
[POS]:    Form layer - dynamic form assembled from module metadata
[UPDATE]: When changing submission rules or form-level notices
[UPDATE]: 2026-10-14 Resolve interface options for headless submissions
*/

use interceptor_adapter::{Module, ResourceApi};
use tracing::{debug, warn};

use super::widget::ArgWidget;
use crate::error::FormError;

/// Outcome line shown under the form after a start attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    Created(String),
    Failed(String),
}

impl FormNotice {
    pub fn message(&self) -> String {
        match self {
            FormNotice::Created(task) => format!("New task created: {task}"),
            FormNotice::Failed(reason) => format!("Error: {reason}"),
        }
    }
}

/// Name/value pairs in argument declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub module: String,
    pub args: Vec<(String, String)>,
}

impl Submission {
    pub fn get(&self, argument: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(name, _)| name == argument)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleForm {
    module: String,
    description: String,
    widgets: Vec<ArgWidget>,
    focus: usize,
    notice: Option<FormNotice>,
}

impl ModuleForm {
    /// One widget per declared argument, in declaration order
    pub fn build(module: Module) -> Self {
        let widgets: Vec<ArgWidget> = module.args.iter().map(ArgWidget::from_spec).collect();
        debug!(module = %module.name, arguments = widgets.len(), "built module form");
        Self {
            module: module.name,
            description: module.description,
            widgets,
            focus: 0,
            notice: None,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn widgets(&self) -> &[ArgWidget] {
        &self.widgets
    }

    pub fn widget(&self, argument: &str) -> Option<&ArgWidget> {
        self.widgets.iter().find(|widget| widget.name() == argument)
    }

    pub fn widget_mut(&mut self, argument: &str) -> Option<&mut ArgWidget> {
        self.widgets
            .iter_mut()
            .find(|widget| widget.name() == argument)
    }

    /// Interface arguments whose options have not been looked up yet
    pub fn pending_lookups(&self) -> Vec<String> {
        self.widgets
            .iter()
            .filter(|widget| {
                widget
                    .interface_select()
                    .is_some_and(|select| select.is_pending())
            })
            .map(|widget| widget.name().to_string())
            .collect()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_mut(&mut self) -> Option<&mut ArgWidget> {
        self.widgets.get_mut(self.focus)
    }

    pub fn focused(&self) -> Option<&ArgWidget> {
        self.widgets.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.widgets.is_empty() {
            self.focus = (self.focus + 1) % self.widgets.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.widgets.is_empty() {
            self.focus = (self.focus + self.widgets.len() - 1) % self.widgets.len();
        }
    }

    pub fn notice(&self) -> Option<&FormNotice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: FormNotice) {
        self.notice = Some(notice);
    }

    /// Collect every argument value; the first unresolved or invalid argument aborts
    pub fn submission(&self) -> Result<Submission, FormError> {
        let args = self
            .widgets
            .iter()
            .map(|widget| Ok((widget.name().to_string(), widget.value()?)))
            .collect::<Result<Vec<_>, FormError>>()?;
        Ok(Submission {
            module: self.module.clone(),
            args,
        })
    }

    /// Apply `name=value` overrides typed by the operator
    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (argument, value) in overrides {
            self.widget_mut(argument)
                .ok_or_else(|| FormError::UnknownArgument(argument.to_string()))?
                .set_text(value)?;
        }
        Ok(())
    }

    /// Populate every pending interface chooser with one lookup each
    pub async fn resolve_interfaces(&mut self, api: &dyn ResourceApi) {
        for argument in self.pending_lookups() {
            let result = api.list_interfaces().await;
            let Some(select) = self
                .widget_mut(&argument)
                .and_then(ArgWidget::interface_select_mut)
            else {
                continue;
            };
            match result {
                Ok(interfaces) => select.populate(interfaces),
                Err(err) => {
                    warn!(argument = %argument, error = %err, "interface lookup failed");
                    select.fail(err.to_string());
                }
            }
        }
    }
}
