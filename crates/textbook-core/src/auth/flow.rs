//! Sign-in / sign-up wizard.
//!
//! ```text
//!            create_account()              submit_credentials() ok
//!   SignIn ───────────────────► SignUp ───────────────────────────► BackgroundQuestions
//!     ▲  ◄───────────────────    ▲  ◄─────────────────────────────────────┘   │
//!     │      have_account()      │               back()                       │ complete()
//!     │ sign_in() ok             │                                            ▼
//!     └──────────► AuthCompletion (host closes the dialog) ◄──────────────────┘
//! ```
//!
//! Sign-in only matches the stored profile by email. The password is
//! accepted and ignored: there is no credential authority to check it
//! against.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use super::form::{BackgroundAnswers, Credentials, MIN_PASSWORD_LENGTH};
use crate::error::TextbookError;
use crate::profile::{Profile, ProfileStore};
use crate::session::SessionNotifier;

/// Wizard steps. `SignIn` is where every fresh dialog starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthStep {
    #[default]
    SignIn,
    SignUp,
    BackgroundQuestions,
}

/// Inline errors. `Display` is the message shown under the form.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("No account found. Please sign up first.")]
    NoAccountFound,

    #[error("Signup failed. Please try again.")]
    Storage(#[source] TextbookError),

    #[error("Action not available on the {actual} step (expected {expected})")]
    WrongStep { expected: AuthStep, actual: AuthStep },
}

/// Which path finished the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    SignIn,
    SignUp,
}

/// Returned when the flow finishes. The host closes the dialog on receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCompletion {
    pub profile: Profile,
    pub path: AuthPath,
}

/// Drives the auth dialog.
///
/// Writes go to the injected [`ProfileStore`] (sign-up only) and every
/// completion is announced on the injected [`SessionNotifier`].
#[derive(Debug)]
pub struct AuthFlow {
    store: ProfileStore,
    notifier: SessionNotifier,
    step: AuthStep,
    credentials: Option<Credentials>,
    answers: BackgroundAnswers,
    error: Option<AuthError>,
}

impl AuthFlow {
    pub fn new(store: ProfileStore, notifier: SessionNotifier) -> Self {
        Self {
            store,
            notifier,
            step: AuthStep::SignIn,
            credentials: None,
            answers: BackgroundAnswers::default(),
            error: None,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    /// The inline error from the last action, if it failed.
    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    /// Answers being edited on the questions step.
    pub fn answers(&self) -> &BackgroundAnswers {
        &self.answers
    }

    pub fn answers_mut(&mut self) -> &mut BackgroundAnswers {
        &mut self.answers
    }

    /// Back to a blank sign-in form, as when the dialog is reopened.
    pub fn reset(&mut self) {
        self.step = AuthStep::SignIn;
        self.credentials = None;
        self.answers = BackgroundAnswers::default();
        self.error = None;
    }

    /// "Create account" link on the sign-in step.
    pub fn create_account(&mut self) -> Result<(), AuthError> {
        self.expect_step(AuthStep::SignIn)?;
        self.go_to(AuthStep::SignUp);
        Ok(())
    }

    /// "Already have an account?" link on the sign-up step.
    pub fn have_account(&mut self) -> Result<(), AuthError> {
        self.expect_step(AuthStep::SignUp)?;
        self.go_to(AuthStep::SignIn);
        Ok(())
    }

    /// Validates the sign-up form and moves on to the background questions.
    pub fn submit_credentials(&mut self, credentials: Credentials) -> Result<(), AuthError> {
        self.expect_step(AuthStep::SignUp)?;

        if credentials.name.is_empty()
            || credentials.email.is_empty()
            || credentials.password.is_empty()
        {
            return Err(self.fail(AuthError::MissingFields));
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(self.fail(AuthError::PasswordTooShort));
        }

        self.credentials = Some(credentials);
        self.answers = BackgroundAnswers::default();
        self.go_to(AuthStep::BackgroundQuestions);
        Ok(())
    }

    /// Leaves the questions step. Answers given so far are dropped.
    pub fn back(&mut self) -> Result<(), AuthError> {
        self.expect_step(AuthStep::BackgroundQuestions)?;
        self.answers = BackgroundAnswers::default();
        self.go_to(AuthStep::SignUp);
        Ok(())
    }

    /// Creates, saves and announces the new profile.
    pub fn complete(&mut self) -> Result<AuthCompletion, AuthError> {
        self.expect_step(AuthStep::BackgroundQuestions)?;
        let Some(credentials) = self.credentials.clone() else {
            // Only reachable through submit_credentials, which always sets them.
            self.go_to(AuthStep::SignUp);
            return Err(self.fail(AuthError::MissingFields));
        };

        let profile = self.answers.clone().into_profile(&credentials);
        if let Err(e) = self.store.save(&profile) {
            tracing::error!("Signup error: {}", e);
            return Err(self.fail(AuthError::Storage(e)));
        }

        tracing::info!(profile_id = profile.id(), "Sign-up completed");
        Ok(self.finish(profile, AuthPath::SignUp))
    }

    /// Signs in with the stored profile when the email matches.
    ///
    /// `_password` is accepted for form parity and never checked.
    pub fn sign_in(&mut self, email: &str, _password: &str) -> Result<AuthCompletion, AuthError> {
        self.expect_step(AuthStep::SignIn)?;

        match self.store.load() {
            Some(profile) if profile.has_email(email) => {
                tracing::info!(profile_id = profile.id(), "Sign-in completed");
                Ok(self.finish(profile, AuthPath::SignIn))
            }
            _ => Err(self.fail(AuthError::NoAccountFound)),
        }
    }

    fn finish(&mut self, profile: Profile, path: AuthPath) -> AuthCompletion {
        self.notifier.announce_login(profile.clone());
        self.reset();
        AuthCompletion { profile, path }
    }

    fn go_to(&mut self, step: AuthStep) {
        tracing::debug!(from = %self.step, to = %step, "Auth step change");
        self.step = step;
        self.error = None;
    }

    fn fail(&mut self, error: AuthError) -> AuthError {
        self.error = Some(error.clone());
        error
    }

    fn expect_step(&self, expected: AuthStep) -> Result<(), AuthError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(AuthError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}
