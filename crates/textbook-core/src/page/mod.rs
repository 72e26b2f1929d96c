//! Page domain module.
//!
//! - `region`: the `Page` / `ContentRegion` traits and `AugmentationBlock`
//! - `model`: `DocPage`, an in-memory chapter
//! - `markdown`: Markdown parsing and rendering for `DocPage`

mod markdown;
mod model;
mod region;

pub use model::{Article, DocPage, PageBlock};
pub use region::{
    AugmentationBlock, BlockTone, ContentRegion, PERSONALIZE_BLOCK_ID, Page, TRANSLATE_BLOCK_ID,
    TextDirection,
};
