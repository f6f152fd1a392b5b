//! Presentation rules for forecast cards, the trend chart and alerts.
//! Colors are palette names; the UI maps them to terminal colors.

use crate::types::{DayForecast, ExtremeEvent, Severity};

/// Placeholder text when the chart has no points
pub const NO_CHART_DATA: &str = "No chart data available";

/// Round half up, so -2.5 shows as -2 and 2.5 as 3
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Color band for a temperature in °C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Scorching,
    Hot,
    Warm,
    Cool,
    Cold,
}

impl TemperatureBand {
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature >= 35.0 {
            Self::Scorching
        } else if temperature >= 25.0 {
            Self::Hot
        } else if temperature >= 15.0 {
            Self::Warm
        } else if temperature >= 5.0 {
            Self::Cool
        } else {
            Self::Cold
        }
    }

    pub fn palette(&self) -> &'static str {
        match self {
            Self::Scorching => "red",
            Self::Hot => "orange",
            Self::Warm => "yellow",
            Self::Cool => "blue",
            Self::Cold => "dark_blue",
        }
    }
}

/// Badge style for model confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    Success,
    Primary,
    Warning,
    Danger,
}

impl ConfidenceLevel {
    pub fn from_percent(confidence: f64) -> Self {
        if confidence >= 95.0 {
            Self::Success
        } else if confidence >= 85.0 {
            Self::Primary
        } else if confidence >= 75.0 {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    pub fn palette(&self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Primary => "cyan",
            Self::Warning => "yellow",
            Self::Danger => "red",
        }
    }
}

/// Alert box style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Danger,
    Warning,
    Info,
}

impl From<Severity> for AlertVariant {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::High => Self::Danger,
            Severity::Medium => Self::Warning,
            Severity::Low | Severity::Unknown => Self::Info,
        }
    }
}

impl AlertVariant {
    pub fn palette(&self) -> &'static str {
        match self {
            Self::Danger => "red",
            Self::Warning => "yellow",
            Self::Info => "blue",
        }
    }
}

/// Header line of an alert
pub fn alert_title(event: &ExtremeEvent) -> String {
    format!("Day {} - {}", event.day, event.date)
}

/// `heat_wave` -> `Heat Wave`
pub fn format_pattern(pattern: &str) -> String {
    pattern
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Oct 16`, or the raw date string when it does not parse
pub fn short_date(day: &DayForecast) -> String {
    day.day()
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|| day.date.clone())
}

/// Text for one forecast card
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub weekday: String,
    pub date: String,
    pub glyph: &'static str,
    pub condition: &'static str,
    pub mean: String,
    pub band: TemperatureBand,
    pub high: String,
    pub low: String,
    pub precipitation: String,
    pub wind: String,
    pub confidence: String,
    pub confidence_level: ConfidenceLevel,
    pub pattern: String,
}

impl DayCard {
    pub fn from_day(day: &DayForecast) -> Self {
        let condition = day.condition();
        Self {
            weekday: day
                .day()
                .map(|d| d.format("%a").to_string())
                .unwrap_or_default(),
            date: short_date(day),
            glyph: condition.glyph(),
            condition: condition.description(),
            mean: format!("{}°C", round_half_up(day.temperature.mean)),
            band: TemperatureBand::from_celsius(day.temperature.mean),
            high: format!("H: {}°", round_half_up(day.temperature.max)),
            low: format!("L: {}°", round_half_up(day.temperature.min)),
            precipitation: format!("{}%", day.precipitation.probability),
            wind: format!("{} km/h", round_half_up(day.wind.max_speed)),
            confidence: format!("{}% Confidence", day.confidence),
            confidence_level: ConfidenceLevel::from_percent(day.confidence),
            pattern: format_pattern(&day.atmospheric_pattern),
        }
    }
}

/// One x-axis entry of the temperature trend chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub high: f64,
    pub mean: f64,
    pub low: f64,
    pub confidence: f64,
}

pub fn chart_series(forecast: &[DayForecast]) -> Vec<ChartPoint> {
    forecast
        .iter()
        .map(|day| ChartPoint {
            label: short_date(day),
            high: day.temperature.max,
            mean: day.temperature.mean,
            low: day.temperature.min,
            confidence: day.confidence,
        })
        .collect()
}

/// Y-axis bounds covering every series, padded to whole 5° steps
pub fn chart_bounds(points: &[ChartPoint]) -> Option<(f64, f64)> {
    let low = points.iter().map(|p| p.low.min(p.mean)).reduce(f64::min)?;
    let high = points.iter().map(|p| p.high.max(p.mean)).reduce(f64::max)?;
    let floor = (low / 5.0).floor() * 5.0;
    let mut ceil = (high / 5.0).ceil() * 5.0;
    if ceil <= floor {
        ceil = floor + 5.0;
    }
    Some((floor, ceil))
}

/// Tooltip text for a chart point
pub fn chart_tooltip(point: &ChartPoint) -> String {
    format!(
        "{}  High: {}°C  Average: {}°C  Low: {}°C",
        point.label,
        round_half_up(point.high),
        round_half_up(point.mean),
        round_half_up(point.low)
    )
}
