use crate::locator::Locator;

/// A navigable screen of the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Content { locator: Locator },
    Search { query: String },
}

/// Navigation stack. `Home` is always the floor and is never popped.
///
/// The search route behaves as a keyed singleton: navigating to search
/// while a search route is current replaces its query in place instead of
/// stacking a second results page. Content routes stack normally, except
/// that re-opening the locator already on top is a no-op.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Router {
            stack: vec![Route::Home],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty: Home is pushed at construction and
        // back() refuses to pop the last element.
        self.stack.last().expect("route stack is never empty")
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Opens the content page for a locator.
    pub fn open_content(&mut self, locator: Locator) {
        let route = Route::Content { locator };
        if *self.current() == route {
            return;
        }
        self.stack.push(route);
    }

    /// Opens the search-results page for a query, replacing the query in
    /// place when a results page is already current.
    pub fn open_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if let Some(Route::Search { query: current }) = self.stack.last_mut() {
            *current = query;
            return;
        }
        self.stack.push(Route::Search { query });
    }

    /// Pops to the previous route. Returns false at the stack floor.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::new()
    }
}
