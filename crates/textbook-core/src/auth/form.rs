//! Form data collected by the auth flow.

use std::collections::BTreeSet;

use crate::profile::{
    ExperienceLevel, HardwareBackground, Interest, Profile, ProgrammingLanguage,
    SoftwareBackground,
};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Name, email and password from the sign-up step.
///
/// The password is only checked for length; it is never stored.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Answers to the background questions. Everything but the experience level
/// may be left blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackgroundAnswers {
    pub experience_level: ExperienceLevel,
    pub software_background: Option<SoftwareBackground>,
    pub hardware_background: Option<HardwareBackground>,
    pub programming_languages: BTreeSet<ProgrammingLanguage>,
    pub interests: BTreeSet<Interest>,
}

impl BackgroundAnswers {
    /// Ticks `language` if unticked, unticks it otherwise.
    pub fn toggle_language(&mut self, language: ProgrammingLanguage) {
        if !self.programming_languages.remove(&language) {
            self.programming_languages.insert(language);
        }
    }

    /// Ticks `interest` if unticked, unticks it otherwise.
    pub fn toggle_interest(&mut self, interest: Interest) {
        if !self.interests.remove(&interest) {
            self.interests.insert(interest);
        }
    }

    pub(crate) fn into_profile(self, credentials: &Credentials) -> Profile {
        Profile::new(
            credentials.email.clone(),
            credentials.name.clone(),
            self.experience_level,
        )
        .with_software_background(self.software_background)
        .with_hardware_background(self.hardware_background)
        .with_languages(self.programming_languages)
        .with_interests(self.interests)
    }
}
