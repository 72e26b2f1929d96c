//! Session domain module.
//!
//! # Module Structure
//!
//! - `event`: `SessionEvent` (login / logout)
//! - `notifier`: `SessionNotifier` broadcast and `SessionListener`
//! - `view`: `SessionView` for UI fragments and the `logout` action

mod event;
mod notifier;
mod view;

pub use event::SessionEvent;
pub use notifier::{SessionListener, SessionNotifier};
pub use view::{SessionView, logout};
