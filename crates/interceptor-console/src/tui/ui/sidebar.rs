/*
[INPUT]:  Sidebar list pane of the shared view and the sidebar cursor
[OUTPUT]: Module or task list rendered into Ratatui frame
[POS]:    TUI UI sidebar rendering
[UPDATE]: 2026-10-16 Mark the active entry separately from the cursor
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem};

use interceptor_console::lock_view;

use crate::tui::app::AppState;
use crate::tui::runtime::{active_style, pane_block};

pub(in crate::tui) fn draw_sidebar(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
    focused: bool,
) {
    let (title, items) = {
        let view = lock_view(&app.view);
        let pane = &view.sidebar;
        let items = if !pane.is_loaded() {
            vec![ListItem::new("Loading...")]
        } else if pane.entries().is_empty() {
            vec![ListItem::new(format!("No {} found", view.category.title().to_lowercase()))]
        } else {
            pane.entries()
                .iter()
                .map(|entry| {
                    if pane.is_active(&entry.name) {
                        ListItem::new(Line::from(Span::styled(entry.name.clone(), active_style())))
                    } else {
                        ListItem::new(entry.name.clone())
                    }
                })
                .collect()
        };
        (view.category.title(), items)
    };

    let list = List::new(items)
        .block(pane_block(title, focused))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.sidebar_state);
}
