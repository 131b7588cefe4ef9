//! The seven conventional REST actions.

use std::fmt;

use axum::http::Method;

/// A conventional resource action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    New,
    Create,
    Show,
    Edit,
    Update,
    Destroy,
}

impl Action {
    /// Order in which conventional routes are registered.
    ///
    /// Literal routes (`/new`, `/:id/edit`) come before `/:id`, so a
    /// request for `/new` is never captured as `id = "new"`.
    pub const REGISTRATION_ORDER: [Action; 7] = [
        Action::New,
        Action::Edit,
        Action::List,
        Action::Create,
        Action::Show,
        Action::Update,
        Action::Destroy,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::New => "new",
            Action::Create => "create",
            Action::Show => "show",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Action::List | Action::New | Action::Show | Action::Edit => Method::GET,
            Action::Create => Method::POST,
            Action::Update => Method::PATCH,
            Action::Destroy => Method::DELETE,
        }
    }

    /// Path template, relative to the resource mount point.
    pub fn path(self) -> &'static str {
        match self {
            Action::List | Action::Create => "/",
            Action::New => "/new",
            Action::Show | Action::Update | Action::Destroy => "/:id",
            Action::Edit => "/:id/edit",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Action::List => 0,
            Action::New => 1,
            Action::Create => 2,
            Action::Show => 3,
            Action::Edit => 4,
            Action::Update => 5,
            Action::Destroy => 6,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_covers_every_action_once() {
        let mut seen = [false; 7];
        for action in Action::REGISTRATION_ORDER {
            assert!(!seen[action.index()], "{} listed twice", action);
            seen[action.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_literal_routes_before_id() {
        let position = |a: Action| {
            Action::REGISTRATION_ORDER
                .iter()
                .position(|x| *x == a)
                .unwrap()
        };
        assert!(position(Action::New) < position(Action::Show));
        assert!(position(Action::Edit) < position(Action::Show));
    }
}
