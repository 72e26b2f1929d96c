//! Augmentation domain module.
//!
//! Personalization and translation are two independent toggles over the same
//! content region. This module holds what both share: the kind, the on/off
//! state, the blocks they insert and their fallbacks. The HTTP-driven client
//! lives in `textbook-interaction`.

mod fallback;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::page::{
    AugmentationBlock, BlockTone, PERSONALIZE_BLOCK_ID, TRANSLATE_BLOCK_ID, TextDirection,
};
use crate::profile::ExperienceLevel;

pub use fallback::{Fetched, TRANSLATE_FALLBACK, personalize_fallback};

/// Characters of chapter text sent for personalization.
pub const PERSONALIZE_CHAR_BUDGET: usize = 2000;
/// Characters of chapter text sent for translation.
pub const TRANSLATE_CHAR_BUDGET: usize = 1500;
/// Characters of personalized text shown in the inserted block.
pub const PERSONALIZED_PREVIEW_CHARS: usize = 800;
/// Target language of the translate toggle.
pub const TARGET_LANGUAGE: &str = "urdu";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AugmentationKind {
    Personalize,
    Translate,
}

impl AugmentationKind {
    pub fn char_budget(&self) -> usize {
        match self {
            Self::Personalize => PERSONALIZE_CHAR_BUDGET,
            Self::Translate => TRANSLATE_CHAR_BUDGET,
        }
    }

    pub fn block_id(&self) -> &'static str {
        match self {
            Self::Personalize => PERSONALIZE_BLOCK_ID,
            Self::Translate => TRANSLATE_BLOCK_ID,
        }
    }
}

/// On/off state of both toggles for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationState {
    pub personalized: bool,
    pub translated: bool,
}

impl AugmentationState {
    pub fn is_on(&self, kind: AugmentationKind) -> bool {
        match kind {
            AugmentationKind::Personalize => self.personalized,
            AugmentationKind::Translate => self.translated,
        }
    }

    pub fn set(&mut self, kind: AugmentationKind, on: bool) {
        match kind {
            AugmentationKind::Personalize => self.personalized = on,
            AugmentationKind::Translate => self.translated = on,
        }
    }
}

/// First `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Block inserted by personalization.
///
/// `level` is the signed-in reader's level; `None` means anonymous, which
/// is personalized for beginners with a hint to sign in.
pub fn personalized_block(content: &str, level: Option<ExperienceLevel>) -> AugmentationBlock {
    let audience = match level {
        Some(ExperienceLevel::Beginner) => "for beginners".to_string(),
        Some(level) => format!("for {} learners", level),
        None => "for beginners (sign in for personalized content)".to_string(),
    };
    AugmentationBlock {
        id: PERSONALIZE_BLOCK_ID.to_string(),
        heading: format!("✨ Personalized {}:", audience),
        body: format!("{}...", truncate_chars(content, PERSONALIZED_PREVIEW_CHARS)),
        tone: BlockTone::Info,
        direction: TextDirection::Ltr,
    }
}

/// Block inserted by translation. Always right-to-left.
pub fn translated_block(content: &str) -> AugmentationBlock {
    AugmentationBlock {
        id: TRANSLATE_BLOCK_ID.to_string(),
        heading: "🌐 اردو ترجمہ:".to_string(),
        body: content.to_string(),
        tone: BlockTone::Success,
        direction: TextDirection::Rtl,
    }
}
