//! Client-side routes and the page provider registry.

use std::sync::Arc;

use crate::{Config, APP_NAME};

/// A top-level screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Features,
    Dashboard,
    HowItWorks,
    About,
    NotFound,
}

impl Route {
    /// Resolve a path to a route. Unknown paths fall through to `NotFound`.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
        let normalized = without_query.trim_end_matches('/').to_ascii_lowercase();

        match normalized.as_str() {
            "" => Route::Home,
            "/features" | "features" => Route::Features,
            "/dashboard" | "dashboard" => Route::Dashboard,
            "/how-it-works" | "how-it-works" => Route::HowItWorks,
            "/about" | "about" => Route::About,
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Features => "/features",
            Route::Dashboard => "/dashboard",
            Route::HowItWorks => "/how-it-works",
            Route::About => "/about",
            Route::NotFound => "/404",
        }
    }

    /// Document title shown in the header bar
    pub fn title(&self) -> String {
        match self {
            Route::Home => format!("{} - AI-Powered Climate Predictions", APP_NAME),
            Route::Features => format!("Features - {}", APP_NAME),
            Route::Dashboard => format!("Dashboard - {}", APP_NAME),
            Route::HowItWorks => format!("How It Works - {}", APP_NAME),
            Route::About => format!("About - {}", APP_NAME),
            Route::NotFound => format!("404 - Page Not Found | {}", APP_NAME),
        }
    }
}

/// Navigation bar entry.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub name: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: [NavLink; 5] = [
    NavLink { name: "Home", route: Route::Home },
    NavLink { name: "Features", route: Route::Features },
    NavLink { name: "Dashboard", route: Route::Dashboard },
    NavLink { name: "How It Works", route: Route::HowItWorks },
    NavLink { name: "About", route: Route::About },
];

/// A titled block of static text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub title: String,
    pub body: String,
}

impl PageSection {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Presentational content for a route.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub heading: String,
    pub tagline: Option<String>,
    pub sections: Vec<PageSection>,
}

/// Provides the content of one route
pub trait PageProvider: Send + Sync {
    /// Unique identifier for this page
    fn id(&self) -> &str;

    /// Route served by this provider
    fn route(&self) -> Route;

    /// Build the page content
    fn content(&self, ctx: &PageContext) -> PageContent;
}

/// Context handed to page providers
pub struct PageContext {
    pub config: Arc<Config>,
}

impl PageContext {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}
