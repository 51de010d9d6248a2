/*
[INPUT]:  Database pane of the shared view and the database cursor
[OUTPUT]: Host, service and credential lists plus host detail
[POS]:    TUI UI database panel rendering
[UPDATE]: 2026-10-16 Show the picked up host in the detail block
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Tabs, Wrap};

use interceptor_console::lock_view;
use interceptor_console::view::{DatabasePane, DatabaseTab};

use crate::tui::app::AppState;
use crate::tui::runtime::{error_style, header_style, pane_block};

pub(in crate::tui) fn draw_database(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
    focused: bool,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(area);

    let picked = app.console.picked().map(|payload| payload.raw().to_string());
    let view = lock_view(&app.view);
    let database = &view.database;

    let titles = DatabaseTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect::<Vec<_>>();
    let selected = DatabaseTab::ALL
        .iter()
        .position(|tab| *tab == database.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(pane_block("Database", focused))
        .highlight_style(header_style())
        .select(selected);
    frame.render_widget(tabs, sections[0]);

    let list = List::new(list_items(database))
        .block(pane_block(database.tab.title(), focused))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, sections[1], &mut app.database_state);

    let mut detail = Vec::new();
    if let Some(error) = &database.detail.error {
        detail.push(Line::from(Span::styled(format!("Error: {error}"), error_style())));
    } else if let Some(host) = &database.detail.host {
        detail.push(Line::from(format!("id:   {}", host.id)));
        detail.push(Line::from(format!("ipv4: {}", host.ipv4.as_deref().unwrap_or("-"))));
        detail.push(Line::from(format!("ipv6: {}", host.ipv6.as_deref().unwrap_or("-"))));
        detail.push(Line::from(format!("mac:  {}", host.mac.as_deref().unwrap_or("-"))));
    } else {
        detail.push(Line::from("[Enter] host detail  [y] pick up"));
    }
    if let Some(raw) = picked {
        detail.push(Line::from(Span::styled(
            format!("holding: {raw}"),
            Style::default().fg(Color::Yellow),
        )));
    }
    let detail = Paragraph::new(detail)
        .block(pane_block("Host", false))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, sections[2]);
}

fn list_items(database: &DatabasePane) -> Vec<ListItem<'static>> {
    let (loaded, rows): (bool, Vec<String>) = match database.tab {
        DatabaseTab::Hosts => (
            database.hosts.is_loaded(),
            database.hosts.entries().iter().map(|host| host.label()).collect(),
        ),
        DatabaseTab::Services => (
            database.services.is_loaded(),
            database
                .services
                .entries()
                .iter()
                .map(|service| {
                    format!(
                        "{} {}/{} {}",
                        service.host_id,
                        service.port.map(|port| port.to_string()).unwrap_or_else(|| "-".to_string()),
                        service.transport_protocol.as_deref().unwrap_or("-"),
                        service.service.as_deref().unwrap_or(""),
                    )
                })
                .collect(),
        ),
        DatabaseTab::Credentials => (
            database.credentials.is_loaded(),
            database
                .credentials
                .entries()
                .iter()
                .map(|credential| {
                    format!(
                        "{} {}:{}",
                        credential.service_id,
                        credential.login_name.as_deref().unwrap_or("-"),
                        credential.credential.as_deref().unwrap_or("-"),
                    )
                })
                .collect(),
        ),
    };

    if !loaded {
        vec![ListItem::new("Loading...")]
    } else if rows.is_empty() {
        vec![ListItem::new("Empty")]
    } else {
        rows.into_iter().map(ListItem::new).collect()
    }
}
