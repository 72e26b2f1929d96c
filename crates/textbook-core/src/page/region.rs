//! Seams between augmentation and whatever renders the chapter.

use serde::{Deserialize, Serialize};

/// Id of the block inserted by personalization.
pub const PERSONALIZE_BLOCK_ID: &str = "personalize-notice";
/// Id of the block inserted by translation.
pub const TRANSLATE_BLOCK_ID: &str = "urdu-notice";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Visual tone of an inserted block, so it stands apart from chapter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTone {
    Info,
    Success,
}

impl BlockTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Info => "alert alert--info margin-bottom--md",
            Self::Success => "alert alert--success margin-bottom--md",
        }
    }
}

/// A distinguishable block inserted at the top of the content region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationBlock {
    pub id: String,
    pub heading: String,
    pub body: String,
    pub tone: BlockTone,
    pub direction: TextDirection,
}

/// The primary content container of a page.
pub trait ContentRegion {
    /// Chapter text, without any inserted augmentation blocks.
    fn visible_text(&self) -> String;

    /// Inserts `block` near the top of the region: right after the first
    /// heading or paragraph, or first when there is neither. A block with
    /// the same id is replaced.
    fn insert_block(&mut self, block: AugmentationBlock);

    /// Removes the block with `id`. Returns whether one was removed.
    fn remove_block(&mut self, id: &str) -> bool;

    fn block(&self, id: &str) -> Option<&AugmentationBlock>;
}

/// A page that may or may not contain a content region.
pub trait Page: Send {
    fn content_region(&self) -> Option<&dyn ContentRegion>;

    fn content_region_mut(&mut self) -> Option<&mut dyn ContentRegion>;

    /// Page-wide right-to-left layout flag.
    fn set_rtl(&mut self, rtl: bool);

    fn is_rtl(&self) -> bool;
}
