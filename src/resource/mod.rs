//! REST resource registration.
//!
//! # Data Flow
//! ```text
//! Controller (trait impl) ──from_controller──┐
//!                                            ▼
//! ad-hoc handlers ──on(action, h)──▶ ActionTable
//!                                            │
//!                                            ▼
//!                                   register_resource()
//!                                     → check all seven actions bound
//!                                     → register in conventional order
//!                                     → Router (open for custom routes)
//! ```
//!
//! | Verb   | Path        | Action  |
//! |--------|-------------|---------|
//! | GET    | `/new`      | new     |
//! | GET    | `/:id/edit` | edit    |
//! | GET    | `/`         | list    |
//! | POST   | `/`         | create  |
//! | GET    | `/:id`      | show    |
//! | PATCH  | `/:id`      | update  |
//! | DELETE | `/:id`      | destroy |

pub mod action;
pub mod controller;

pub use action::Action;
pub use controller::{register_resource, ActionTable, Controller};
