//! Route Table

use std::fmt;
use std::str::FromStr;

use crate::severity::ParseError;

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, regardless of session
    Public,
    /// Only visitors without a session (login, register)
    PublicOnly,
    /// Only authenticated users
    Protected,
}

/// Every screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, which always forwards to the dashboard
    Root,
    Login,
    Register,
    Dashboard,
    Predict,
    Vlogs,
    Alerts,
    Hospitals,
    Profile,
    NotFound,
}

impl Route {
    /// Where unauthenticated visitors are sent
    pub const PUBLIC_ENTRY: Route = Route::Login;

    /// Where authenticated visitors are sent
    pub const AUTHENTICATED_ENTRY: Route = Route::Dashboard;

    /// Routes shown in the navigation bar, in order
    pub const NAV: [Route; 6] = [
        Route::Dashboard,
        Route::Predict,
        Route::Vlogs,
        Route::Alerts,
        Route::Hospitals,
        Route::Profile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Predict => "/predict",
            Route::Vlogs => "/vlogs",
            Route::Alerts => "/alerts",
            Route::Hospitals => "/hospitals",
            Route::Profile => "/profile",
            Route::NotFound => "/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Root | Route::Dashboard => "Dashboard",
            Route::Login => "Sign In",
            Route::Register => "Create Account",
            Route::Predict => "Symptom Predictor",
            Route::Vlogs => "Patient Stories",
            Route::Alerts => "Community Alerts",
            Route::Hospitals => "Hospital Finder",
            Route::Profile => "Profile",
            Route::NotFound => "Page Not Found",
        }
    }

    pub fn access(self) -> Access {
        match self {
            Route::Login | Route::Register => Access::PublicOnly,
            Route::NotFound => Access::Public,
            Route::Root
            | Route::Dashboard
            | Route::Predict
            | Route::Vlogs
            | Route::Alerts
            | Route::Hospitals
            | Route::Profile => Access::Protected,
        }
    }

    /// Resolve a location path; unknown paths map to [`Route::NotFound`]
    pub fn from_path(path: &str) -> Route {
        path.parse().unwrap_or(Route::NotFound)
    }
}

impl FromStr for Route {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Ok(Route::Root),
            "/login" => Ok(Route::Login),
            "/register" => Ok(Route::Register),
            "/dashboard" => Ok(Route::Dashboard),
            "/predict" => Ok(Route::Predict),
            "/vlogs" => Ok(Route::Vlogs),
            "/alerts" => Ok(Route::Alerts),
            "/hospitals" => Ok(Route::Hospitals),
            "/profile" => Ok(Route::Profile),
            _ => Err(ParseError::UnknownRoute(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in Route::NAV {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/"), Route::Root);
    }

    #[test]
    fn test_trailing_slash_and_query() {
        assert_eq!(Route::from_path("/alerts/"), Route::Alerts);
        assert_eq!(Route::from_path("/hospitals?specialty=ICU"), Route::Hospitals);
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(Route::from_path("/admin"), Route::NotFound);
        assert!("/admin".parse::<Route>().is_err());
    }

    #[test]
    fn test_access_table() {
        assert_eq!(Route::Login.access(), Access::PublicOnly);
        assert_eq!(Route::Register.access(), Access::PublicOnly);
        assert_eq!(Route::NotFound.access(), Access::Public);
        assert!(Route::NAV.iter().all(|r| r.access() == Access::Protected));
    }
}
