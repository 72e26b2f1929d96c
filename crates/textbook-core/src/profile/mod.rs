//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted `Profile` and its answer vocabularies
//! - `store`: `ProfileStore`, the single device-local slot
//! - `hints`: `PersonalizationHints` derived from an optional profile
//!
//! # Usage
//!
//! ```ignore
//! use textbook_core::profile::{Profile, ProfileStore, PersonalizationHints};
//! ```

mod hints;
mod model;
mod store;

pub use hints::{DEFAULT_BACKGROUND, DEFAULT_EXAMPLES, DEFAULT_INTERESTS, PersonalizationHints};
pub use model::{
    ExperienceLevel, HardwareBackground, Interest, Profile, ProgrammingLanguage,
    SoftwareBackground,
};
pub use store::{DEFAULT_PROFILE_KEY, ProfileStore};
