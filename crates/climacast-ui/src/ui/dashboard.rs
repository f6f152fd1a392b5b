//! Dashboard rendering: location picker, alerts, forecast cards and the
//! temperature trend chart.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph, Wrap},
    Frame,
};

use climacast_forecast::display::{
    alert_title, chart_bounds, chart_series, chart_tooltip, ChartPoint, NO_CHART_DATA,
};
use climacast_forecast::state::SKELETON_CARDS;
use climacast_forecast::{AlertVariant, DayCard, ForecastView};
use climacast_geocoding::POPULAR_CITIES;

use super::theme::{palette, Theme};
use crate::app::DashboardApp;
use crate::dashboard::Focus;

const MAX_VISIBLE_SUGGESTIONS: usize = 5;
const CARD_HEIGHT: u16 = 11;

pub fn render(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let model = &app.dashboard;
    let state = &model.forecast;
    let view = state.view();

    let suggestion_height = if model.search.show_suggestions && !model.search.suggestions.is_empty()
    {
        model.search.suggestions.len().min(MAX_VISIBLE_SUGGESTIONS) as u16 + 2
    } else {
        0
    };
    let banner_height = if model.error_banner().is_some() { 3 } else { 0 };
    let alert_height = if state.show_alerts() {
        (state.alerts().len() as u16) * 3 + 2
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                 // Heading + current location
            Constraint::Length(3),                 // Search box
            Constraint::Length(suggestion_height), // Suggestions
            Constraint::Length(1),                 // Popular cities
            Constraint::Length(1),                 // Search error
            Constraint::Length(banner_height),     // Connection error
            Constraint::Length(alert_height),      // Extreme weather alerts
            Constraint::Length(CARD_HEIGHT),       // 7-day forecast
            Constraint::Min(0),                    // Trend chart
        ])
        .split(area);

    render_heading(frame, app, chunks[0], theme);
    render_search_box(frame, app, chunks[1], theme);
    if suggestion_height > 0 {
        render_suggestions(frame, app, chunks[2], theme);
    }
    render_presets(frame, app, chunks[3], theme);
    if let Some(error) = &model.search.error {
        let line = Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), chunks[4]);
    }
    if let Some(banner) = model.error_banner() {
        render_banner(frame, &banner, chunks[5]);
    }
    if alert_height > 0 {
        render_alerts(frame, app, chunks[6]);
    }

    match view {
        ForecastView::Loading => render_skeletons(frame, chunks[7], theme),
        ForecastView::Ready => {
            render_cards(frame, app, chunks[7], theme);
            let points = chart_series(state.days());
            render_chart(frame, &points, model.chart_cursor, chunks[8], theme);
        }
        ForecastView::Empty => render_empty(frame, app, chunks[7].union(chunks[8]), theme),
    }
}

fn render_heading(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(app.content.heading.clone(), theme.accent())),
        Line::from(Span::styled(
            app.content.tagline.clone().unwrap_or_default(),
            theme.muted(),
        )),
    ]);
    frame.render_widget(heading, halves[0]);

    let location = Paragraph::new(vec![
        Line::from(Span::styled("Current Location", theme.muted())),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.highlight)),
            Span::styled(
                app.dashboard.location.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(location, halves[1]);
}

fn render_search_box(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let search = &app.dashboard.search;
    let focused = app.dashboard.focus == Focus::Search;

    let mut spans = vec![Span::raw("⌕ ")];
    if search.input.is_empty() && !focused {
        spans.push(Span::styled("Search for any city worldwide...", theme.muted()));
    } else {
        spans.push(Span::raw(search.input.clone()));
    }
    if focused {
        spans.push(Span::styled("▏", theme.accent()));
    }
    if search.searching {
        spans.push(Span::styled("  searching…", theme.muted()));
    }

    let border = if focused {
        Style::default().fg(theme.highlight)
    } else {
        theme.border()
    };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search City "),
    );
    frame.render_widget(input, area);
}

fn render_suggestions(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let search = &app.dashboard.search;
    let items: Vec<ListItem> = search
        .suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .enumerate()
        .map(|(i, place)| {
            let mut spans = vec![Span::styled(
                format!(" {} ", place.name),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(region) = place.region_line() {
                spans.push(Span::styled(region, theme.muted()));
            }
            let item = ListItem::new(Line::from(spans));
            if i == search.highlighted {
                item.style(theme.selected())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );
    frame.render_widget(list, area);
}

fn render_presets(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let model = &app.dashboard;
    let focused = model.focus == Focus::Presets;

    let mut spans = vec![Span::styled(" Popular: ", theme.muted())];
    for (i, city) in POPULAR_CITIES.iter().enumerate() {
        let mut style = if model.is_current(city) {
            theme.selected()
        } else {
            Style::default()
        };
        if focused && i == model.preset_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", city.name), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("│ ⌖ Use My Current Location (l)", theme.muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_banner(frame: &mut Frame, banner: &str, area: Rect) {
    let red = palette("red");
    let alert = Paragraph::new(Span::styled(banner.to_string(), Style::default().fg(red)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(red))
                .title(" Connection Error "),
        );
    frame.render_widget(alert, area);
}

fn render_alerts(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let mut lines = Vec::new();
    for event in app.dashboard.forecast.alerts() {
        let color = palette(AlertVariant::from(event.severity).palette());
        lines.push(Line::from(Span::styled(
            format!("⚠ {}", alert_title(event)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", event.description)));
        lines.push(Line::from(Span::styled(
            format!("  → {}", event.recommendation),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    let alerts = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette("orange")))
            .title(" Extreme Weather Alerts "),
    );
    frame.render_widget(alerts, area);
}

fn card_columns(area: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

fn render_skeletons(frame: &mut Frame, area: Rect, theme: &Theme) {
    for column in card_columns(area, SKELETON_CARDS) {
        let lines: Vec<Line> = (0..4)
            .map(|_| Line::from(Span::styled("░░░░░░░░", theme.muted())))
            .collect();
        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        frame.render_widget(card, column);
    }
}

fn render_cards(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let days = app.dashboard.forecast.days();
    for (day, column) in days.iter().zip(card_columns(area, days.len())) {
        let card = DayCard::from_day(day);
        let lines = vec![
            Line::from(vec![
                Span::styled(card.weekday.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(card.date.clone(), theme.muted()),
            ]),
            Line::from(format!("{} {}", card.glyph, card.condition)),
            Line::from(Span::styled(
                card.mean.clone(),
                Style::default()
                    .fg(palette(card.band.palette()))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} {}", card.high, card.low)),
            Line::from(format!("☂ {}", card.precipitation)),
            Line::from(format!("≋ {}", card.wind)),
            Line::from(Span::styled(
                card.confidence.clone(),
                Style::default().fg(palette(card.confidence_level.palette())),
            )),
            Line::from(Span::styled(card.pattern.clone(), theme.muted())),
        ];

        let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        frame.render_widget(widget, column);
    }
}

fn render_chart(
    frame: &mut Frame,
    points: &[ChartPoint],
    cursor: usize,
    area: Rect,
    theme: &Theme,
) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" Temperature Trend Analysis ");
    let selected = points.get(cursor.min(points.len().saturating_sub(1)));
    if let Some(point) = selected {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" ◆ {} ", chart_tooltip(point)),
            theme.accent(),
        )));
    }

    let Some((low, high)) = chart_bounds(points) else {
        let empty = Paragraph::new(Span::styled(NO_CHART_DATA, theme.muted()))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let highs = series(points, |p| p.high);
    let means = series(points, |p| p.mean);
    let lows = series(points, |p| p.low);
    let marker: Vec<(f64, f64)> = selected
        .map(|point| {
            let x = cursor.min(points.len() - 1) as f64;
            vec![(x, point.high), (x, point.mean), (x, point.low)]
        })
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("High")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette("red")))
            .data(&highs),
        Dataset::default()
            .name("Average")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette("yellow")))
            .data(&means),
        Dataset::default()
            .name("Low")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette("blue")))
            .data(&lows),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.accent())
            .data(&marker),
    ];

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Span> = points
        .iter()
        .map(|p| Span::styled(p.label.clone(), theme.muted()))
        .collect();
    let y_labels = vec![
        Span::raw(format!("{}°C", low)),
        Span::raw(format!("{}°C", (low + high) / 2.0)),
        Span::raw(format!("{}°C", high)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.muted())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted())
                .bounds([low, high])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn series(points: &[ChartPoint], value: impl Fn(&ChartPoint) -> f64) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, value(p)))
        .collect()
}

fn render_empty(frame: &mut Frame, app: &DashboardApp, area: Rect, theme: &Theme) {
    let api_url = app.dashboard.api_url();
    let lines = vec![
        Line::from(Span::styled(
            "No Weather Data",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Unable to fetch forecast data. This might be because:"),
        Line::from(Span::styled(
            format!("• Backend server is not running (check {})", api_url),
            theme.muted(),
        )),
        Line::from(Span::styled("• API connection failed", theme.muted())),
        Line::from(Span::styled(
            "• Selected location has no data available",
            theme.muted(),
        )),
        Line::default(),
        Line::from(Span::styled("Press r to retry loading data", theme.accent())),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" 7-Day Forecast "),
        );
    frame.render_widget(panel, area);
}
