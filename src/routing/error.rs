//! Setup-time routing errors.

use axum::http::Method;
use thiserror::Error;

use crate::resource::Action;

/// Errors raised while building a route table.
///
/// All of these surface before the server starts accepting traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A controller did not bind one of the seven conventional actions.
    #[error("resource `{resource}` is missing the `{action}` action")]
    MissingAction { resource: String, action: Action },

    /// Two routes share the same verb and path shape.
    #[error("duplicate route: {method} {path}")]
    DuplicateRoute { method: Method, path: String },

    /// The path pattern could not be parsed.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
}
