//! In-memory chapter page.

use serde::{Deserialize, Serialize};

use super::region::{AugmentationBlock, ContentRegion, Page};

/// One block of chapter content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Code { language: Option<String>, code: String },
    Augmentation(AugmentationBlock),
}

impl PageBlock {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Heading { text, .. } | Self::Paragraph { text } => Some(text.as_str()),
            Self::Code { code, .. } => Some(code.as_str()),
            Self::Augmentation(_) => None,
        }
    }

    fn is_anchor(&self) -> bool {
        matches!(self, Self::Heading { .. } | Self::Paragraph { .. })
    }
}

/// The chapter's main content container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub blocks: Vec<PageBlock>,
}

impl Article {
    pub fn new(blocks: Vec<PageBlock>) -> Self {
        Self { blocks }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| matches!(b, PageBlock::Augmentation(a) if a.id == id))
    }
}

impl ContentRegion for Article {
    fn visible_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(PageBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn insert_block(&mut self, block: AugmentationBlock) {
        if let Some(existing) = self.position(&block.id) {
            self.blocks[existing] = PageBlock::Augmentation(block);
            return;
        }

        let at = self
            .blocks
            .iter()
            .position(PageBlock::is_anchor)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.blocks.insert(at, PageBlock::Augmentation(block));
    }

    fn remove_block(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.blocks.remove(index);
                true
            }
            None => false,
        }
    }

    fn block(&self, id: &str) -> Option<&AugmentationBlock> {
        self.blocks.iter().find_map(|b| match b {
            PageBlock::Augmentation(a) if a.id == id => Some(a),
            _ => None,
        })
    }
}

/// A rendered chapter: an optional article plus the page-wide layout flag.
///
/// Frontmatter is page metadata. It is carried through untouched and is not
/// part of the article's visible text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPage {
    frontmatter: Option<String>,
    article: Option<Article>,
    rtl: bool,
}

impl DocPage {
    pub fn new(article: Option<Article>) -> Self {
        Self {
            frontmatter: None,
            article,
            rtl: false,
        }
    }

    pub fn with_blocks(blocks: Vec<PageBlock>) -> Self {
        Self::new(Some(Article::new(blocks)))
    }

    /// A page with no content container.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }

    /// The raw frontmatter block, `---` delimiters included.
    pub fn frontmatter(&self) -> Option<&str> {
        self.frontmatter.as_deref()
    }

    pub(super) fn set_frontmatter(&mut self, frontmatter: Option<String>) {
        self.frontmatter = frontmatter;
    }
}

impl Page for DocPage {
    fn content_region(&self) -> Option<&dyn ContentRegion> {
        self.article.as_ref().map(|a| a as &dyn ContentRegion)
    }

    fn content_region_mut(&mut self) -> Option<&mut dyn ContentRegion> {
        self.article.as_mut().map(|a| a as &mut dyn ContentRegion)
    }

    fn set_rtl(&mut self, rtl: bool) {
        self.rtl = rtl;
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }
}
