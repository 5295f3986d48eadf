//! Where the client goes after a flow finishes.

use std::time::Duration;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Client-side routes a flow can end on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Home,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
        }
    }
}

/// A navigation instruction, optionally delayed.
///
/// Serialized as `{ route, path, delay_ms }` so clients need no route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

impl Redirect {
    pub fn immediate(route: Route) -> Self {
        Self {
            route,
            delay: Duration::ZERO,
        }
    }

    pub fn after(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }
}

impl Serialize for Redirect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Redirect", 3)?;
        state.serialize_field("route", &self.route)?;
        state.serialize_field("path", self.route.path())?;
        state.serialize_field("delay_ms", &(self.delay.as_millis() as u64))?;
        state.end()
    }
}
