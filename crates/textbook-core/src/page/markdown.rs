//! Markdown in, Markdown out.
//!
//! Only the block structure the chapters use is recognised: a leading
//! `---` frontmatter block, ATX headings, fenced code and blank-line
//! separated paragraphs. Paragraph lines are kept verbatim so lists and
//! MDX markup survive a round trip. Inserted augmentation blocks render as
//! HTML `<div>`s, which MDX pages accept as-is.

use super::model::{Article, DocPage, PageBlock};
use super::region::{AugmentationBlock, Page, TextDirection};

/// CommonMark allows up to three spaces before a heading marker.
const MAX_HEADING_INDENT: usize = 3;

impl DocPage {
    /// Parses chapter Markdown. A document with no blocks has no content region.
    pub fn from_markdown(source: &str) -> Self {
        let (frontmatter, body) = split_frontmatter(source);
        let blocks = parse_blocks(body);
        let mut page = if blocks.is_empty() {
            Self::empty()
        } else {
            Self::new(Some(Article::new(blocks)))
        };
        page.set_frontmatter(frontmatter.map(str::to_string));
        page
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        if let Some(frontmatter) = self.frontmatter() {
            out.push_str(frontmatter);
            out.push('\n');
        }

        let Some(article) = self.article() else {
            return out;
        };
        if !out.is_empty() {
            out.push('\n');
        }

        let rendered: Vec<String> = article.blocks.iter().map(render_block).collect();
        let body = rendered.join("\n\n");
        if self.is_rtl() {
            out.push_str(&format!("<div dir=\"rtl\">\n\n{}\n\n</div>\n", body));
        } else {
            out.push_str(&body);
            out.push('\n');
        }
        out
    }
}

/// Splits off a frontmatter block opened and closed by a `---` line.
/// An unclosed block is ordinary content.
fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        offset += line.len();
        let is_delimiter = line.trim_end() == "---";
        if index == 0 && !is_delimiter {
            break;
        }
        if index > 0 && is_delimiter {
            return (Some(source[..offset].trim_end()), &source[offset..]);
        }
    }
    (None, source)
}

fn parse_blocks(source: &str) -> Vec<PageBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_end();

        if let Some(fence) = trimmed.trim_start().strip_prefix("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            let language = Some(fence.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            let mut code = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim_start().starts_with("```") {
                    break;
                }
                code.push(inner);
            }
            blocks.push(PageBlock::Code {
                language,
                code: code.join("\n"),
            });
            continue;
        }

        if trimmed.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(PageBlock::Heading {
                level,
                text: text.to_string(),
            });
            continue;
        }

        paragraph.push(trimmed);
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let unindented = line.trim_start_matches(' ');
    if line.len() - unindented.len() > MAX_HEADING_INDENT {
        return None;
    }
    let hashes = unindented.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &unindented[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<PageBlock>) {
    if paragraph.is_empty() {
        return;
    }
    blocks.push(PageBlock::Paragraph {
        text: paragraph.join("\n"),
    });
    paragraph.clear();
}

fn render_block(block: &PageBlock) -> String {
    match block {
        PageBlock::Heading { level, text } => {
            format!("{} {}", "#".repeat(usize::from(*level)), text)
        }
        PageBlock::Paragraph { text } => text.clone(),
        PageBlock::Code { language, code } => format!(
            "```{}\n{}\n```",
            language.as_deref().unwrap_or_default(),
            code
        ),
        PageBlock::Augmentation(block) => render_augmentation(block),
    }
}

fn render_augmentation(block: &AugmentationBlock) -> String {
    let dir = match block.direction {
        TextDirection::Ltr => String::new(),
        TextDirection::Rtl => " dir=\"rtl\"".to_string(),
    };
    format!(
        "<div id=\"{}\" class=\"{}\"{}>\n\n**{}**\n\n{}\n\n</div>",
        block.id,
        block.tone.css_class(),
        dir,
        block.heading,
        block.body
    )
}
