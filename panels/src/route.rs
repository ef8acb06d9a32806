//! Page routes and the session guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server runs [`decide`] before rendering a page and the browser runs
//! [`guard`] whenever the current account changes, so both sides agree on
//! which pages need a signed-in account and where unknown paths land.

use crate::wire::Account;

pub const DASHBOARD_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Signup,
    ResetPassword,
}

/// What to do with a page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(&'static str),
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => DASHBOARD_PATH,
            Self::Login => LOGIN_PATH,
            Self::Signup => SIGNUP_PATH,
            Self::ResetPassword => RESET_PASSWORD_PATH,
        }
    }

    /// `true` for pages that require a signed-in account.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Map a request path onto a page. Unknown paths redirect to the dashboard.
    #[must_use]
    pub fn resolve(path: &str) -> Resolution {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Resolution::Render(Self::Dashboard),
            LOGIN_PATH => Resolution::Render(Self::Login),
            SIGNUP_PATH => Resolution::Render(Self::Signup),
            RESET_PASSWORD_PATH => Resolution::Render(Self::ResetPassword),
            _ => Resolution::Redirect(DASHBOARD_PATH),
        }
    }
}

/// Gate a page on the current account.
#[must_use]
pub fn guard(route: Route, account: Option<&Account>) -> Resolution {
    if route.is_protected() && account.is_none() {
        Resolution::Redirect(LOGIN_PATH)
    } else {
        Resolution::Render(route)
    }
}

/// Resolve a path and apply the guard in one step.
#[must_use]
pub fn decide(path: &str, account: Option<&Account>) -> Resolution {
    match Route::resolve(path) {
        Resolution::Render(route) => guard(route, account),
        redirect @ Resolution::Redirect(_) => redirect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account { id: "uid-1".to_owned(), email: "user@example.com".to_owned() }
    }

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::resolve("/"), Resolution::Render(Route::Dashboard));
        assert_eq!(Route::resolve("/login"), Resolution::Render(Route::Login));
        assert_eq!(Route::resolve("/signup"), Resolution::Render(Route::Signup));
        assert_eq!(Route::resolve("/reset-password"), Resolution::Render(Route::ResetPassword));
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(Route::resolve("/login/"), Resolution::Render(Route::Login));
        assert_eq!(Route::resolve(""), Resolution::Render(Route::Dashboard));
    }

    #[test]
    fn unknown_path_redirects_to_dashboard() {
        assert_eq!(Route::resolve("/whatever"), Resolution::Redirect("/"));
        assert_eq!(Route::resolve("/login/extra"), Resolution::Redirect("/"));
    }

    #[test]
    fn unauthenticated_dashboard_redirects_to_login() {
        assert_eq!(decide("/", None), Resolution::Redirect("/login"));
    }

    #[test]
    fn authenticated_dashboard_renders() {
        assert_eq!(decide("/", Some(&account())), Resolution::Render(Route::Dashboard));
    }

    #[test]
    fn public_pages_render_without_account() {
        for route in [Route::Login, Route::Signup, Route::ResetPassword] {
            assert_eq!(guard(route, None), Resolution::Render(route));
        }
    }

    #[test]
    fn unknown_path_redirects_even_when_signed_in() {
        assert_eq!(decide("/whatever", Some(&account())), Resolution::Redirect("/"));
    }

    #[test]
    fn route_paths_resolve_to_themselves() {
        for route in [Route::Dashboard, Route::Login, Route::Signup, Route::ResetPassword] {
            assert_eq!(Route::resolve(route.path()), Resolution::Render(route));
        }
    }
}
