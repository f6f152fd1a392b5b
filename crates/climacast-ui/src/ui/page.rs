//! Static page rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use climacast_core::PageContent;

use super::theme::Theme;

pub fn render(frame: &mut Frame, content: &PageContent, area: Rect, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            content.heading.clone(),
            theme.accent().add_modifier(Modifier::UNDERLINED),
        ))
        .alignment(Alignment::Center),
    ];
    if let Some(tagline) = &content.tagline {
        lines.push(Line::from(Span::styled(tagline.clone(), theme.muted())).alignment(Alignment::Center));
    }

    for section in &content.sections {
        lines.push(Line::default());
        if !section.title.is_empty() {
            lines.push(Line::from(Span::styled(
                section.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(section.body.clone()));
    }

    let page = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(page, area);
}
