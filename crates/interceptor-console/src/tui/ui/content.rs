/*
[INPUT]:  Content pane of the shared view
[OUTPUT]: Module form or task output rendered into Ratatui frame
[POS]:    TUI UI content panel rendering
[UPDATE]: 2026-10-16 Show the form notice under the argument fields
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use interceptor_console::form::{FormNotice, ModuleForm};
use interceptor_console::lock_view;
use interceptor_console::view::{ContentBody, TaskOutputView};

use crate::tui::app::AppState;
use crate::tui::runtime::{active_style, error_style, pane_block};

pub(in crate::tui) fn draw_content(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
    focused: bool,
) {
    let view = lock_view(&app.view);
    match &view.content.body {
        ContentBody::Empty => {
            let hint = Paragraph::new("Select an entry from the list.")
                .block(pane_block("Content", focused));
            frame.render_widget(hint, area);
        }
        ContentBody::Loading(name) => {
            let loading = Paragraph::new(format!("Loading {name}..."))
                .block(pane_block(name.clone(), focused));
            frame.render_widget(loading, area);
        }
        ContentBody::Failed { title, reason } => {
            let failed = Paragraph::new(Line::from(Span::styled(
                format!("Error: {reason}"),
                error_style(),
            )))
            .block(pane_block(title.clone(), focused))
            .wrap(Wrap { trim: false });
            frame.render_widget(failed, area);
        }
        ContentBody::Module(form) => draw_form(frame, area, form, focused),
        ContentBody::Task(task) => draw_task_output(frame, area, task, focused),
    }
}

fn draw_form(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    form: &ModuleForm,
    focused: bool,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let label_style = Style::default().fg(Color::Cyan);
    let focus_style = Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    if !form.description().is_empty() {
        lines.push(Line::from(form.description().to_string()));
        lines.push(Line::from(""));
    }
    for (index, widget) in form.widgets().iter().enumerate() {
        let marker = if focused && index == form.focus() { "> " } else { "  " };
        let required = if widget.is_required() { "*" } else { "" };
        let value_style = if focused && index == form.focus() {
            focus_style
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}{required}", widget.name()), label_style),
            Span::raw(format!(" ({}): ", widget.type_name())),
            Span::styled(widget.display_value(), value_style),
        ]));
    }

    let fields = Paragraph::new(Text::from(lines))
        .block(pane_block(format!("Module: {}", form.module()), focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(fields, sections[0]);

    let notice = match form.notice() {
        Some(notice @ FormNotice::Created(_)) => Line::from(Span::styled(notice.message(), active_style())),
        Some(notice @ FormNotice::Failed(_)) => Line::from(Span::styled(notice.message(), error_style())),
        None => Line::from("[Enter] start module"),
    };
    let notice = Paragraph::new(notice).block(pane_block("Result", false));
    frame.render_widget(notice, sections[1]);
}

fn draw_task_output(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    task: &TaskOutputView,
    focused: bool,
) {
    let available = area.height.saturating_sub(2) as usize;
    let lines = task.output().lines().collect::<Vec<_>>();
    let start = lines.len().saturating_sub(available);
    let text = lines[start..]
        .iter()
        .map(|line| Line::from(Span::raw(line.to_string())))
        .collect::<Vec<_>>();

    let title = if task.is_running() {
        format!("{} [x] stop", task.title())
    } else {
        task.title()
    };
    let output = Paragraph::new(text).block(pane_block(title, focused));
    frame.render_widget(output, area);
}
