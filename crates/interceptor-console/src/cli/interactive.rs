/*
[INPUT]:  A built module form and operator input via CLI prompts
[OUTPUT]: Form values edited in place, one prompt per argument
[POS]:    CLI interactive flow
[UPDATE]: 2026-10-16 Prompt per argument kind for `start --interactive`
*/

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use interceptor_console::form::{Control, InterfaceOptions, ModuleForm};

/// Walk every argument of `form`, pre-filled with its current value
pub fn prompt_arguments(form: &mut ModuleForm) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style(format!("Module {}", form.module())).bold().cyan());
    if !form.description().is_empty() {
        println!("{}", style(form.description()).dim());
    }

    let names = form
        .widgets()
        .iter()
        .map(|widget| widget.name().to_string())
        .collect::<Vec<_>>();
    for name in names {
        let Some(widget) = form.widget_mut(&name) else {
            continue;
        };
        let prompt = if widget.is_required() {
            format!("{name} ({}, required)", widget.type_name())
        } else {
            format!("{name} ({})", widget.type_name())
        };

        match widget.control().clone() {
            Control::Toggle(current) => {
                let checked = Confirm::with_theme(&theme)
                    .with_prompt(prompt)
                    .default(current)
                    .interact()?;
                widget.set_text(&checked.to_string())?;
            }
            Control::Interface(select) => match select.options() {
                InterfaceOptions::Ready { options, .. } if !options.is_empty() => {
                    let labels = options.iter().map(|option| option.label()).collect::<Vec<_>>();
                    let default = select
                        .selected()
                        .and_then(|chosen| options.iter().position(|option| option.name == chosen.name))
                        .unwrap_or(0);
                    let index = Select::with_theme(&theme)
                        .with_prompt(prompt)
                        .items(&labels)
                        .default(default)
                        .interact()?;
                    widget.set_text(&options[index].name)?;
                }
                InterfaceOptions::Failed(reason) => {
                    println!("{}", style(format!("{name}: interfaces unavailable: {reason}")).yellow());
                }
                _ => {
                    println!("{}", style(format!("{name}: no interfaces to choose from")).yellow());
                }
            },
            Control::Integer(current) | Control::Text(current) | Control::TextList(current) => loop {
                let raw: String = Input::with_theme(&theme)
                    .with_prompt(prompt.clone())
                    .default(current.clone())
                    .allow_empty(true)
                    .interact_text()?;
                match widget.set_text(&raw) {
                    Ok(()) => break,
                    Err(err) => println!("{}", style(err).red()),
                }
            },
        }
    }
    Ok(())
}
