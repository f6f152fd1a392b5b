//! Interactive dashboard state and input handling.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

use climacast_core::{App, AppError, Config, ConfigError, PageContent, Route, NAV_LINKS};
use climacast_forecast::ForecastView;

use crate::app_services::AppServices;
use crate::dashboard::{DashboardModel, FetchPlan, Focus, SelectedLocation};
use crate::pages;
use crate::search::SearchAction;
use crate::services::{self, SearchDebouncer, ServiceMessage};

pub struct DashboardApp {
    core: App,
    config: Config,
    services: AppServices,
    debouncer: SearchDebouncer,
    pub route: Route,
    pub content: PageContent,
    pub dashboard: DashboardModel,
    /// One-line notice in the footer
    pub status: Option<String>,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new(config: Config) -> Result<(Self, UnboundedReceiver<ServiceMessage>)> {
        let (services, rx) = AppServices::from_config(&config)?;

        let mut core = App::with_config(config.clone());
        pages::register_all(&mut core);
        let (route, content) = core.navigate(Route::Home.path());

        let debouncer = SearchDebouncer::new(std::time::Duration::from_millis(
            config.geocoding.debounce_ms,
        ));

        Ok((
            Self {
                dashboard: DashboardModel::new(&config),
                core,
                config,
                services,
                debouncer,
                route,
                content,
                status: None,
                should_quit: false,
            },
            rx,
        ))
    }

    pub fn dark_mode(&self) -> bool {
        self.config.ui.dark_mode
    }

    pub fn title(&self) -> String {
        self.route.title()
    }

    /// Go to a path. Entering the dashboard for the first time loads the
    /// default location.
    pub fn navigate(&mut self, path: &str) {
        let (route, content) = self.core.navigate(path);
        self.route = route;
        self.content = content;
        self.dashboard.focus = Focus::None;

        if route == Route::Dashboard && self.dashboard.needs_initial_load() {
            let plan = self.dashboard.reload();
            self.start(plan);
        }
    }

    fn start(&self, plan: FetchPlan) {
        let tx = self.services.sender();
        services::request_forecast(
            tx,
            self.services.forecast.clone(),
            self.services.task_token(),
            plan.forecast_ticket,
            plan.lat,
            plan.lon,
            plan.days,
        );
        if let Some(ticket) = plan.extreme_ticket {
            services::request_extreme(
                tx,
                self.services.forecast.clone(),
                self.services.task_token(),
                ticket,
                plan.lat,
                plan.lon,
            );
        }
    }

    fn select(&mut self, location: SelectedLocation) {
        let plan = self.dashboard.select(location);
        self.start(plan);
    }

    /// Apply a result from a background task
    pub fn handle_message(&mut self, message: ServiceMessage) {
        match message {
            ServiceMessage::ForecastDone { ticket, result } => {
                self.dashboard.forecast.finish_forecast(ticket, result);
            }
            ServiceMessage::ExtremeDone { ticket, result } => {
                self.dashboard.forecast.finish_extreme(ticket, result);
            }
            ServiceMessage::SearchDone { term, result } => {
                self.dashboard.search.apply_results(&term, result);
            }
            ServiceMessage::LocateDone(Ok(place)) => {
                tracing::info!("Got device location: ({}, {})", place.lat, place.lon);
                self.dashboard.search.accept(&place);
                self.select(SelectedLocation::from(&place));
            }
            ServiceMessage::LocateDone(Err(e)) => {
                let message = AppError::from(e).user_message();
                self.dashboard.search.fail(message);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.route == Route::Dashboard {
            match self.dashboard.focus {
                Focus::Search => {
                    self.on_search_key(key);
                    return;
                }
                Focus::Presets => {
                    if self.on_preset_key(key.code) {
                        return;
                    }
                }
                Focus::None => {}
            }
        }

        self.on_key(key.code);
    }

    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.cycle_route(1),
            KeyCode::BackTab => self.cycle_route(-1),
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(link) = NAV_LINKS.get(index) {
                    self.navigate(link.route.path());
                }
            }
            KeyCode::Char('d') => self.toggle_dark_mode(),
            KeyCode::Char('h') if self.route == Route::NotFound => {
                self.navigate(Route::Home.path());
            }
            _ if self.route == Route::Dashboard => self.on_dashboard_key(code),
            _ => {}
        }
    }

    fn on_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('/') | KeyCode::Char('s') => self.dashboard.focus = Focus::Search,
            KeyCode::Char('p') => self.dashboard.focus = Focus::Presets,
            KeyCode::Char('l') => self.use_my_location(),
            KeyCode::Left => self.dashboard.move_chart_cursor(-1),
            KeyCode::Right => self.dashboard.move_chart_cursor(1),
            KeyCode::Char('r') => {
                let plan = if self.dashboard.forecast.view() == ForecastView::Empty {
                    self.dashboard.retry()
                } else {
                    self.dashboard.reload()
                };
                self.start(plan);
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dashboard.search.clear();
                Some(SearchAction::Cancel)
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(self.dashboard.search.push_char(c))
            }
            KeyCode::Backspace => Some(self.dashboard.search.pop_char()),
            KeyCode::Down => {
                self.dashboard.search.highlight_next();
                None
            }
            KeyCode::Up => {
                self.dashboard.search.highlight_prev();
                None
            }
            KeyCode::Enter => {
                if let Some(place) = self.dashboard.search.take_highlighted() {
                    self.dashboard.focus = Focus::None;
                    self.select(SelectedLocation::from(&place));
                }
                None
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.dashboard.search.show_suggestions = false;
                self.dashboard.focus = Focus::None;
                None
            }
            _ => None,
        };

        match action {
            Some(SearchAction::Schedule(term)) => self.debouncer.schedule(
                self.services.sender(),
                self.services.geocoder.clone(),
                &self.services.task_token(),
                term,
            ),
            Some(SearchAction::Cancel) => self.debouncer.cancel(),
            None => {}
        }
    }

    /// Returns true when the key was consumed
    fn on_preset_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.dashboard.move_preset_cursor(-1),
            KeyCode::Right => self.dashboard.move_preset_cursor(1),
            KeyCode::Enter => {
                self.debouncer.cancel();
                if let Some(plan) = self.dashboard.select_preset() {
                    self.start(plan);
                }
            }
            KeyCode::Esc => self.dashboard.focus = Focus::None,
            _ => return false,
        }
        true
    }

    fn use_my_location(&mut self) {
        self.dashboard.search.begin_locating();
        services::request_locate(
            self.services.sender(),
            self.services.locator.clone(),
            self.services.geocoder.clone(),
            self.services.task_token(),
        );
    }

    fn cycle_route(&mut self, step: isize) {
        let len = NAV_LINKS.len() as isize;
        let current = NAV_LINKS
            .iter()
            .position(|link| link.route == self.route)
            .map(|i| i as isize)
            .unwrap_or(-1);
        let next = if current < 0 && step < 0 {
            len - 1
        } else {
            (current + step).rem_euclid(len)
        };
        if let Some(link) = NAV_LINKS.get(next as usize) {
            self.navigate(link.route.path());
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.config.ui.dark_mode = !self.config.ui.dark_mode;
        tracing::info!("Dark mode: {}", self.config.ui.dark_mode);

        match self.config.save_to(&self.config.file_path()) {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::error!("Failed to save dark mode preference: {:#}", e);
                let err = AppError::from(ConfigError::SaveFailed(e.to_string()));
                self.status = Some(err.user_message().to_string());
            }
        }
    }

    /// Cancel every outstanding background task
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.services.shutdown();
    }
}
