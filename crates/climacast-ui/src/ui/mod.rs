//! Terminal rendering.

pub mod dashboard;
pub mod page;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use climacast_core::{Route, NAV_LINKS};

use crate::app::DashboardApp;
use crate::dashboard::Focus;
use theme::Theme;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &DashboardApp) {
    let theme = Theme::new(app.dark_mode());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Min(10),   // Page
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_nav(frame, app, chunks[0], &theme);
    match app.route {
        Route::Dashboard => dashboard::render(frame, app, chunks[1], &theme),
        _ => page::render(frame, &app.content, chunks[1], &theme),
    }
    render_footer(frame, app, chunks[2], &theme);
}

fn render_nav(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let mut spans = vec![Span::styled(" ☁ ClimaCast AI ", theme.accent()), Span::raw("│")];
    for (i, link) in NAV_LINKS.iter().enumerate() {
        let style = if link.route == app.route {
            theme.selected()
        } else {
            Style::default()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", i + 1, link.name), style));
    }
    let mode = if app.dark_mode() { "☾ Dark" } else { "☀ Light" };
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(mode, theme.muted()));

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(format!(" {} ", app.title())),
    );
    frame.render_widget(nav, area);
}

fn key_hints(app: &DashboardApp) -> &'static str {
    match (app.route, app.dashboard.focus) {
        (Route::Dashboard, Focus::Search) => {
            " type to search │ ↑/↓ choose │ Enter select │ Ctrl+U clear │ Esc back"
        }
        (Route::Dashboard, Focus::Presets) => " ←/→ choose city │ Enter select │ Esc back",
        (Route::Dashboard, Focus::None) => {
            " / search │ p popular cities │ l my location │ ←/→ chart day │ r reload │ Tab pages │ d theme │ q quit"
        }
        (Route::NotFound, _) => " h home │ Tab pages │ q quit",
        _ => " Tab/1-5 pages │ d theme │ q quit",
    }
}

fn render_footer(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let mut spans = vec![Span::styled(key_hints(app), theme.muted())];
    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.clone(), Style::default().fg(theme::palette("red"))));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
