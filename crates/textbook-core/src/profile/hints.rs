//! Personalization hints derived from the stored profile.

use serde::{Deserialize, Serialize};

use super::model::{ExperienceLevel, Profile, ProgrammingLanguage};

/// Background sent when the reader has not answered the question.
pub const DEFAULT_BACKGROUND: &str = "other";
/// Interests sent for anonymous readers.
pub const DEFAULT_INTERESTS: [&str; 2] = ["robotics", "ai"];
/// Example language sent when the reader knows neither Python nor C++.
pub const DEFAULT_EXAMPLES: &str = "python";

/// What the personalize endpoint needs to know about the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizationHints {
    pub experience_level: ExperienceLevel,
    pub background: String,
    pub interests: Vec<String>,
    pub preferred_examples: String,
}

impl PersonalizationHints {
    /// Hints for a reader that has not signed in.
    pub fn anonymous() -> Self {
        Self {
            experience_level: ExperienceLevel::Beginner,
            background: DEFAULT_BACKGROUND.to_string(),
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
            preferred_examples: DEFAULT_EXAMPLES.to_string(),
        }
    }

    /// Builds hints from an optional profile.
    ///
    /// A signed-in reader's interests are sent as-is, even when empty; the
    /// anonymous defaults only apply when there is no profile at all.
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        let Some(profile) = profile else {
            return Self::anonymous();
        };

        let background = profile
            .software_background
            .map(|b| b.to_string())
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());

        let languages = &profile.programming_languages;
        let preferred_examples = if languages.contains(&ProgrammingLanguage::Python) {
            "python"
        } else if languages.contains(&ProgrammingLanguage::Cpp) {
            "cpp"
        } else {
            DEFAULT_EXAMPLES
        };

        Self {
            experience_level: profile.experience_level,
            background,
            interests: profile.interests.iter().map(|i| i.to_string()).collect(),
            preferred_examples: preferred_examples.to_string(),
        }
    }
}

impl Default for PersonalizationHints {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Interest, SoftwareBackground};

    #[test]
    fn test_anonymous_defaults() {
        let hints = PersonalizationHints::from_profile(None);
        assert_eq!(hints.experience_level, ExperienceLevel::Beginner);
        assert_eq!(hints.background, "other");
        assert_eq!(hints.interests, vec!["robotics", "ai"]);
        assert_eq!(hints.preferred_examples, "python");
    }

    #[test]
    fn test_profile_values_win() {
        let profile = Profile::new("a@example.com", "A", ExperienceLevel::Advanced)
            .with_software_background(Some(SoftwareBackground::Systems))
            .with_languages([ProgrammingLanguage::Cpp])
            .with_interests([Interest::Humanoids, Interest::Drones]);

        let hints = PersonalizationHints::from_profile(Some(&profile));
        assert_eq!(hints.experience_level, ExperienceLevel::Advanced);
        assert_eq!(hints.background, "systems");
        assert_eq!(hints.interests, vec!["Humanoids", "Drones"]);
        assert_eq!(hints.preferred_examples, "cpp");
    }

    #[test]
    fn test_python_preferred_over_cpp() {
        let profile = Profile::new("a@example.com", "A", ExperienceLevel::Beginner)
            .with_languages([ProgrammingLanguage::Cpp, ProgrammingLanguage::Python]);
        let hints = PersonalizationHints::from_profile(Some(&profile));
        assert_eq!(hints.preferred_examples, "python");
    }

    #[test]
    fn test_unanswered_profile_fields() {
        let profile = Profile::new("a@example.com", "A", ExperienceLevel::Intermediate)
            .with_languages([ProgrammingLanguage::Matlab]);
        let hints = PersonalizationHints::from_profile(Some(&profile));
        assert_eq!(hints.background, "other");
        assert!(hints.interests.is_empty());
        assert_eq!(hints.preferred_examples, "python");
    }
}
