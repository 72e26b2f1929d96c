//! Auth domain module.
//!
//! - `form`: `Credentials` and `BackgroundAnswers`
//! - `flow`: the `AuthFlow` wizard

mod flow;
mod form;

pub use flow::{AuthCompletion, AuthError, AuthFlow, AuthPath, AuthStep};
pub use form::{BackgroundAnswers, Credentials, MIN_PASSWORD_LENGTH};
