//! Route table: two static paths, one list view each.

use crate::models::ResourceKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Museums,
    Curators,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Museums, Route::Curators];

    pub fn path(self) -> &'static str {
        match self {
            Route::Museums => "/",
            Route::Curators => "/curadores",
        }
    }

    /// Exact match only; no nested or parameterized paths
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn resource(self) -> ResourceKind {
        match self {
            Route::Museums => ResourceKind::Museum,
            Route::Curators => ResourceKind::Curator,
        }
    }

    pub fn title(self) -> &'static str {
        self.resource().plural()
    }

    pub fn next(self) -> Route {
        match self {
            Route::Museums => Route::Curators,
            Route::Curators => Route::Museums,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Route::Museums => 0,
            Route::Curators => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert_eq!(Route::from_path("/museos"), None);
        assert_eq!(Route::from_path("/curadores/1"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn each_route_owns_one_resource() {
        assert_eq!(Route::Museums.resource(), ResourceKind::Museum);
        assert_eq!(Route::Curators.resource(), ResourceKind::Curator);
        assert_eq!(Route::Museums.next(), Route::Curators);
    }
}
