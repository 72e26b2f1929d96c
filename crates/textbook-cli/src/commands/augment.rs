use std::path::Path;

use anyhow::{Context, Result};
use textbook_core::augmentation::AugmentationKind;
use textbook_core::page::DocPage;
use textbook_interaction::AugmentationClient;
use tokio::sync::Mutex;

use crate::context::AppContext;

/// Applies `kind` to the chapter at `input` and writes the result to
/// `output`, or to stdout when no output path is given.
pub async fn run(
    ctx: &AppContext,
    kind: AugmentationKind,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let page = Mutex::new(DocPage::from_markdown(&source));

    let client = AugmentationClient::new(ctx.backend.clone(), ctx.store.clone());
    let fetched = client.activate(kind, &page).await?;
    if let Some(cause) = fetched.cause() {
        eprintln!(
            "Backend unavailable at {} ({}); showing offline content.",
            ctx.endpoint.base_url(),
            cause
        );
    }

    let rendered = page.lock().await.to_markdown();
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
