use std::sync::Arc;

use crate::page::PageSection;
use crate::{Config, PageContent, PageContext, PageProvider, Route};

/// Main application state: the registered pages and the context they render with
pub struct App {
    pages: Vec<Box<dyn PageProvider>>,
    context: PageContext,
}

impl App {
    pub fn with_config(config: Config) -> Self {
        Self {
            pages: Vec::new(),
            context: PageContext::new(Arc::new(config)),
        }
    }

    /// Register a page. A later registration for the same route wins.
    pub fn register_page(&mut self, page: Box<dyn PageProvider>) {
        tracing::debug!("Registering page: {} ({})", page.id(), page.route().path());
        self.pages.retain(|p| p.route() != page.route());
        self.pages.push(page);
    }

    /// Resolve a path and build the content of the page it lands on
    pub fn navigate(&self, path: &str) -> (Route, PageContent) {
        let route = Route::resolve(path);
        tracing::debug!("Navigating to {} -> {:?}", path, route);

        match self.page(route).or_else(|| self.page(Route::NotFound)) {
            Some(page) => (route, page.content(&self.context)),
            None => (route, fallback_not_found()),
        }
    }

    pub fn page(&self, route: Route) -> Option<&dyn PageProvider> {
        self.pages
            .iter()
            .find(|p| p.route() == route)
            .map(|p| p.as_ref())
    }

}

fn fallback_not_found() -> PageContent {
    PageContent {
        heading: "404".to_string(),
        tagline: Some("Page Not Found".to_string()),
        sections: vec![PageSection::new(
            "",
            "Oops! The page you're looking for seems to have drifted away like a cloud.",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPage {
        route: Route,
        heading: &'static str,
    }

    impl PageProvider for TestPage {
        fn id(&self) -> &str {
            self.heading
        }

        fn route(&self) -> Route {
            self.route
        }

        fn content(&self, _ctx: &PageContext) -> PageContent {
            PageContent {
                heading: self.heading.to_string(),
                tagline: None,
                sections: Vec::new(),
            }
        }
    }

    #[test]
    fn navigate_uses_registered_page() {
        let mut app = App::with_config(Config::default());
        app.register_page(Box::new(TestPage {
            route: Route::About,
            heading: "About Us",
        }));

        let (route, content) = app.navigate("/about");
        assert_eq!(route, Route::About);
        assert_eq!(content.heading, "About Us");
    }

    #[test]
    fn unknown_path_renders_not_found_page() {
        let mut app = App::with_config(Config::default());
        app.register_page(Box::new(TestPage {
            route: Route::NotFound,
            heading: "Lost",
        }));

        let (route, content) = app.navigate("/nowhere");
        assert_eq!(route, Route::NotFound);
        assert_eq!(content.heading, "Lost");
    }

    #[test]
    fn missing_provider_falls_back_to_builtin_404() {
        let app = App::with_config(Config::default());
        let (_, content) = app.navigate("/features");
        assert_eq!(content.heading, "404");
    }

    #[test]
    fn re_registering_a_route_replaces_it() {
        let mut app = App::with_config(Config::default());
        app.register_page(Box::new(TestPage {
            route: Route::Home,
            heading: "Old",
        }));
        app.register_page(Box::new(TestPage {
            route: Route::Home,
            heading: "New",
        }));

        assert_eq!(app.navigate("/").1.heading, "New");
    }
}
