//! Profile domain model.
//!
//! A Profile describes the current reader: who they are and the background
//! they reported while signing up. It is stored as a camelCase JSON object.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Self-reported experience level. A stored record without one reads as
/// beginner.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Software background options offered by the background questions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SoftwareBackground {
    /// No programming experience
    None,
    /// CS/Engineering student
    Student,
    /// Web developer
    Webdev,
    /// Data scientist
    Data,
    /// ML/AI engineer
    Ml,
    /// Systems/embedded developer
    Systems,
    /// Other technical role
    Other,
}

impl SoftwareBackground {
    /// Label shown next to the option in the questions step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No programming experience",
            Self::Student => "CS/Engineering Student",
            Self::Webdev => "Web Developer",
            Self::Data => "Data Scientist",
            Self::Ml => "ML/AI Engineer",
            Self::Systems => "Systems/Embedded Developer",
            Self::Other => "Other Technical Role",
        }
    }
}

/// Hardware background options offered by the background questions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HardwareBackground {
    None,
    Arduino,
    Raspi,
    Robotics,
    Professional,
    Mechanical,
    Electrical,
}

impl HardwareBackground {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No hardware experience",
            Self::Arduino => "Arduino/Hobby Electronics",
            Self::Raspi => "Raspberry Pi Projects",
            Self::Robotics => "Robotics (hobby)",
            Self::Professional => "Professional Robotics",
            Self::Mechanical => "Mechanical Engineering",
            Self::Electrical => "Electrical Engineering",
        }
    }
}

/// Programming languages a reader can tick. Serialized by display name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ProgrammingLanguage {
    Python,
    #[serde(rename = "C++")]
    #[strum(serialize = "C++")]
    Cpp,
    JavaScript,
    C,
    #[serde(rename = "MATLAB")]
    #[strum(serialize = "MATLAB")]
    Matlab,
    #[serde(rename = "ROS")]
    #[strum(serialize = "ROS")]
    Ros,
    #[serde(rename = "None yet")]
    #[strum(serialize = "None yet")]
    NoneYet,
}

/// Topics a reader can mark as interesting. Serialized by display name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Interest {
    #[serde(rename = "AI/ML")]
    #[strum(serialize = "AI/ML")]
    AiMl,
    #[serde(rename = "Robotics Hardware")]
    #[strum(serialize = "Robotics Hardware")]
    RoboticsHardware,
    #[serde(rename = "Computer Vision")]
    #[strum(serialize = "Computer Vision")]
    ComputerVision,
    #[serde(rename = "Control Systems")]
    #[strum(serialize = "Control Systems")]
    ControlSystems,
    Humanoids,
    Drones,
    #[serde(rename = "Autonomous Vehicles")]
    #[strum(serialize = "Autonomous Vehicles")]
    AutonomousVehicles,
}

/// The persisted reader record.
///
/// There is no setter for `id`: it is generated by [`Profile::new`] and kept
/// for the lifetime of the record. A new sign-up produces a new Profile with
/// a new id instead of editing the old one.
///
/// Every field is optional on the way in. Records written by older clients
/// may carry only the answers that drive personalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub software_background: Option<SoftwareBackground>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hardware_background: Option<HardwareBackground>,
    #[serde(default)]
    pub programming_languages: BTreeSet<ProgrammingLanguage>,
    #[serde(default)]
    pub interests: BTreeSet<Interest>,
}

impl Profile {
    /// Creates a Profile with a freshly generated identifier.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        experience_level: ExperienceLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            experience_level,
            software_background: None,
            hardware_background: None,
            programming_languages: BTreeSet::new(),
            interests: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gives a record that was stored without an id a fresh one.
    /// Returns `true` when an id was assigned.
    pub(crate) fn assign_missing_id(&mut self) -> bool {
        if !self.id.is_empty() {
            return false;
        }
        self.id = Uuid::new_v4().to_string();
        true
    }

    pub fn with_software_background(mut self, background: Option<SoftwareBackground>) -> Self {
        self.software_background = background;
        self
    }

    pub fn with_hardware_background(mut self, background: Option<HardwareBackground>) -> Self {
        self.hardware_background = background;
        self
    }

    pub fn with_languages(
        mut self,
        languages: impl IntoIterator<Item = ProgrammingLanguage>,
    ) -> Self {
        self.programming_languages = languages.into_iter().collect();
        self
    }

    pub fn with_interests(mut self, interests: impl IntoIterator<Item = Interest>) -> Self {
        self.interests = interests.into_iter().collect();
        self
    }

    /// Case-sensitive email comparison, the way sign-in matches accounts.
    pub fn has_email(&self, email: &str) -> bool {
        self.email == email
    }
}

/// Accepts `null`, a missing field, or `""` as "not answered".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
