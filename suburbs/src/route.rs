//! Navigation between the landing view and the map view.

/// Logical application routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// Welcome screen.
    #[default]
    Landing,
    /// Suburbs map.
    Map,
}

/// Keeps the current route. The only transitions are landing → map and map → landing.
#[derive(Debug, Default)]
pub struct Navigator {
    route: Route,
}

impl Navigator {
    /// Current route.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Moves from the landing view to the map view. Returns `false` if the map is already shown.
    pub fn go_to_map(&mut self) -> bool {
        self.transition(Route::Landing, Route::Map)
    }

    /// Moves from the map view back to the landing view. Returns `false` if the landing view is
    /// already shown.
    pub fn go_back(&mut self) -> bool {
        self.transition(Route::Map, Route::Landing)
    }

    fn transition(&mut self, from: Route, to: Route) -> bool {
        if self.route != from {
            return false;
        }

        log::debug!("Navigating {from:?} -> {to:?}");
        self.route = to;
        true
    }
}
