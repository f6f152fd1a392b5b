//! Presentational pages. The dashboard route is rendered live; its provider
//! only supplies the heading.

use climacast_core::{App, PageContent, PageContext, PageProvider, PageSection, Route};

/// Feature grid shared by the home and features pages
pub const FEATURES: [(&str, &str); 6] = [
    (
        "AI-Powered Predictions",
        "Leverage IBM-NASA Prithvi WxC foundation model with 2.3 billion parameters for state-of-the-art accuracy.",
    ),
    (
        "Real-Time Forecasts",
        "Get instant 7-day weather predictions with confidence scores ranging from 70% to 98%.",
    ),
    (
        "Extreme Weather Alerts",
        "Automatic detection of extreme conditions with actionable safety recommendations.",
    ),
    (
        "Global Coverage",
        "Access weather predictions for any location worldwide with support for 100+ countries.",
    ),
    (
        "Trend Analysis",
        "Understand patterns with atmospheric analysis and historical comparisons.",
    ),
    (
        "Reliable & Accurate",
        "Built on 40 years of NASA MERRA-2 data with continuous validation.",
    ),
];

fn feature_sections() -> Vec<PageSection> {
    FEATURES
        .iter()
        .map(|(title, body)| PageSection::new(*title, *body))
        .collect()
}

pub struct HomePage;

impl PageProvider for HomePage {
    fn id(&self) -> &str {
        "home"
    }

    fn route(&self) -> Route {
        Route::Home
    }

    fn content(&self, _ctx: &PageContext) -> PageContent {
        let mut sections = vec![PageSection::new(
            "Powered by IBM-NASA Prithvi WxC 2.3B",
            "Experience the future of weather forecasting with our 2.3 billion parameter \
             foundation model trained on 40 years of NASA data.",
        )];
        sections.extend(feature_sections());
        sections.push(PageSection::new(
            "Ready to Experience AI-Powered Weather?",
            "Join thousands of users who trust ClimaCast AI for accurate, reliable weather \
             predictions. Open the Dashboard to get started.",
        ));

        PageContent {
            heading: "Climate Predictions Powered by AI".to_string(),
            tagline: Some("AI-Powered Climate Predictions".to_string()),
            sections,
        }
    }
}

pub struct FeaturesPage;

impl PageProvider for FeaturesPage {
    fn id(&self) -> &str {
        "features"
    }

    fn route(&self) -> Route {
        Route::Features
    }

    fn content(&self, _ctx: &PageContext) -> PageContent {
        PageContent {
            heading: "Everything You Need for Climate Intelligence".to_string(),
            tagline: Some(
                "Advanced AI technology meets intuitive design for accurate weather predictions"
                    .to_string(),
            ),
            sections: feature_sections(),
        }
    }
}

pub struct DashboardPage;

impl PageProvider for DashboardPage {
    fn id(&self) -> &str {
        "dashboard"
    }

    fn route(&self) -> Route {
        Route::Dashboard
    }

    fn content(&self, _ctx: &PageContext) -> PageContent {
        PageContent {
            heading: "Weather Dashboard".to_string(),
            tagline: Some("AI-Powered 7-Day Climate Predictions".to_string()),
            sections: Vec::new(),
        }
    }
}

pub struct HowItWorksPage;

impl PageProvider for HowItWorksPage {
    fn id(&self) -> &str {
        "how-it-works"
    }

    fn route(&self) -> Route {
        Route::HowItWorks
    }

    fn content(&self, ctx: &PageContext) -> PageContent {
        PageContent {
            heading: "How It Works".to_string(),
            tagline: Some("From a place name to a 7-day outlook".to_string()),
            sections: vec![
                PageSection::new(
                    "1. Pick a location",
                    "Search any city, choose one of the popular cities, or use your current \
                     location. Place names are resolved with OpenStreetMap Nominatim.",
                ),
                PageSection::new(
                    "2. Run the model",
                    format!(
                        "The coordinates are sent to the prediction backend at {}, which runs \
                         the Prithvi WxC foundation model.",
                        ctx.config.api.url()
                    ),
                ),
                PageSection::new(
                    "3. Read the forecast",
                    "Each day shows temperature, precipitation chance, wind, the dominant \
                     atmospheric pattern and the model's confidence. Extreme conditions are \
                     flagged with safety recommendations.",
                ),
            ],
        }
    }
}

pub struct AboutPage;

impl PageProvider for AboutPage {
    fn id(&self) -> &str {
        "about"
    }

    fn route(&self) -> Route {
        Route::About
    }

    fn content(&self, _ctx: &PageContext) -> PageContent {
        PageContent {
            heading: "About Us".to_string(),
            tagline: Some("Learn more about Team Foresighters - coming soon!".to_string()),
            sections: Vec::new(),
        }
    }
}

pub struct NotFoundPage;

impl PageProvider for NotFoundPage {
    fn id(&self) -> &str {
        "not-found"
    }

    fn route(&self) -> Route {
        Route::NotFound
    }

    fn content(&self, _ctx: &PageContext) -> PageContent {
        PageContent {
            heading: "404".to_string(),
            tagline: Some("Page Not Found".to_string()),
            sections: vec![PageSection::new(
                "",
                "Oops! The page you're looking for seems to have drifted away like a cloud.",
            )],
        }
    }
}

/// Register every page with the app
pub fn register_all(app: &mut App) {
    app.register_page(Box::new(HomePage));
    app.register_page(Box::new(FeaturesPage));
    app.register_page(Box::new(DashboardPage));
    app.register_page(Box::new(HowItWorksPage));
    app.register_page(Box::new(AboutPage));
    app.register_page(Box::new(NotFoundPage));
}
