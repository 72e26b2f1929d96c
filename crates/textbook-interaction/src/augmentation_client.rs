//! Personalize / translate toggles for one page.
//!
//! Each toggle extracts the chapter text, asks the backend for a rewrite and
//! inserts the result as a block at the top of the content region. When the
//! backend fails, a canned substitute is inserted instead so the toggle still
//! has a visible effect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use textbook_core::augmentation::{
    AugmentationKind, AugmentationState, Fetched, TARGET_LANGUAGE, TRANSLATE_FALLBACK,
    personalize_fallback, personalized_block, translated_block, truncate_chars,
};
use textbook_core::backend::{PersonalizeRequest, TextbookBackend, TranslateRequest};
use textbook_core::page::{AugmentationBlock, Page};
use textbook_core::profile::{PersonalizationHints, ProfileStore};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::flight::FlightGuard;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AugmentationError {
    /// The page has no content region to read from or insert into.
    #[error("Could not find content")]
    NoContent,

    /// A request of this kind is still running.
    #[error("A {0} request is already in progress")]
    Busy(AugmentationKind),
}

/// Drives both toggles for one page view.
///
/// Create a new client per navigation; state is not carried between pages
/// and nothing is cached, so turning a toggle back on issues a new request.
pub struct AugmentationClient {
    backend: Arc<dyn TextbookBackend>,
    store: ProfileStore,
    personalizing: AtomicBool,
    translating: AtomicBool,
    personalized: AtomicBool,
    translated: AtomicBool,
}

impl AugmentationClient {
    pub fn new(backend: Arc<dyn TextbookBackend>, store: ProfileStore) -> Self {
        Self {
            backend,
            store,
            personalizing: AtomicBool::new(false),
            translating: AtomicBool::new(false),
            personalized: AtomicBool::new(false),
            translated: AtomicBool::new(false),
        }
    }

    /// Snapshot of both toggles.
    pub fn state(&self) -> AugmentationState {
        AugmentationState {
            personalized: self.personalized.load(Ordering::Acquire),
            translated: self.translated.load(Ordering::Acquire),
        }
    }

    pub fn is_busy(&self, kind: AugmentationKind) -> bool {
        self.in_flight(kind).load(Ordering::Acquire)
    }

    /// Flips `kind`: deactivates it if on, activates it otherwise.
    ///
    /// Returns the inserted block when the toggle was turned on.
    pub async fn toggle<P: Page>(
        &self,
        kind: AugmentationKind,
        page: &Mutex<P>,
    ) -> Result<Option<Fetched<AugmentationBlock>>, AugmentationError> {
        if self.state().is_on(kind) {
            self.deactivate(kind, page).await;
            Ok(None)
        } else {
            self.activate(kind, page).await.map(Some)
        }
    }

    /// Fetches and inserts the block for `kind`.
    ///
    /// The page lock is only held while reading the text and while inserting
    /// the block, never across the backend call.
    pub async fn activate<P: Page>(
        &self,
        kind: AugmentationKind,
        page: &Mutex<P>,
    ) -> Result<Fetched<AugmentationBlock>, AugmentationError> {
        let _guard = FlightGuard::try_acquire(self.in_flight(kind))
            .ok_or(AugmentationError::Busy(kind))?;

        let content = {
            let page = page.lock().await;
            let region = page.content_region().ok_or_else(|| {
                tracing::warn!("{} requested on a page without content", kind);
                AugmentationError::NoContent
            })?;
            truncate_chars(&region.visible_text(), kind.char_budget()).to_string()
        };

        let fetched = match kind {
            AugmentationKind::Personalize => self.fetch_personalized(content).await,
            AugmentationKind::Translate => self.fetch_translated(content).await,
        };
        if let Some(cause) = fetched.cause() {
            tracing::warn!("{} failed, showing fallback: {}", kind, cause);
        }

        let mut page = page.lock().await;
        let region = page
            .content_region_mut()
            .ok_or(AugmentationError::NoContent)?;
        region.insert_block(fetched.value().clone());
        if kind == AugmentationKind::Translate {
            page.set_rtl(true);
        }
        self.on_flag(kind).store(true, Ordering::Release);

        tracing::info!("{} enabled", kind);
        Ok(fetched)
    }

    /// Removes the block for `kind` and records it as off.
    ///
    /// Returns whether a block was removed.
    pub async fn deactivate<P: Page>(&self, kind: AugmentationKind, page: &Mutex<P>) -> bool {
        let mut page = page.lock().await;
        let removed = page
            .content_region_mut()
            .is_some_and(|region| region.remove_block(kind.block_id()));
        if kind == AugmentationKind::Translate {
            page.set_rtl(false);
        }
        self.on_flag(kind).store(false, Ordering::Release);

        tracing::info!("{} disabled", kind);
        removed
    }

    async fn fetch_personalized(&self, content: String) -> Fetched<AugmentationBlock> {
        let profile = self.store.load();
        let hints = PersonalizationHints::from_profile(profile.as_ref());
        let fallback_level = hints.experience_level;
        let request = PersonalizeRequest::new(content, hints);

        let result = self
            .backend
            .personalize(&request)
            .await
            .map(|response| response.personalized_content);

        Fetched::from_result(result, || personalize_fallback(fallback_level).to_string())
            .map(|text| personalized_block(&text, profile.map(|p| p.experience_level)))
    }

    async fn fetch_translated(&self, content: String) -> Fetched<AugmentationBlock> {
        let request = TranslateRequest {
            content,
            target_language: TARGET_LANGUAGE.to_string(),
        };

        let result = self
            .backend
            .translate(&request)
            .await
            .map(|response| response.translated_content);

        Fetched::from_result(result, || TRANSLATE_FALLBACK.to_string())
            .map(|text| translated_block(&text))
    }

    fn in_flight(&self, kind: AugmentationKind) -> &AtomicBool {
        match kind {
            AugmentationKind::Personalize => &self.personalizing,
            AugmentationKind::Translate => &self.translating,
        }
    }

    fn on_flag(&self, kind: AugmentationKind) -> &AtomicBool {
        match kind {
            AugmentationKind::Personalize => &self.personalized,
            AugmentationKind::Translate => &self.translated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, MockBackend};
    use textbook_core::page::{ContentRegion, DocPage, PageBlock, TextDirection};
    use textbook_core::profile::{ExperienceLevel, Profile, ProgrammingLanguage};
    use textbook_core::backend::BackendError;
    use textbook_core::storage::{KeyValueSlot, MemorySlot};
    use tokio::sync::Notify;

    fn chapter() -> Mutex<DocPage> {
        Mutex::new(DocPage::with_blocks(vec![
            PageBlock::Heading {
                level: 1,
                text: "Sensors".to_string(),
            },
            PageBlock::Paragraph {
                text: "Robots perceive the world through sensors.".to_string(),
            },
        ]))
    }

    fn client_with(backend: Arc<MockBackend>) -> (AugmentationClient, ProfileStore) {
        let store = ProfileStore::new(Arc::new(MemorySlot::new()));
        (AugmentationClient::new(backend, store.clone()), store)
    }

    #[tokio::test]
    async fn test_personalize_anonymous_uses_defaults() {
        let backend = Arc::new(MockBackend::healthy());
        let (client, _store) = client_with(backend.clone());
        let page = chapter();

        let fetched = client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        assert!(!fetched.is_fallback());
        assert!(
            fetched
                .value()
                .heading
                .contains("sign in for personalized content")
        );
        assert!(client.state().personalized);

        let Call::Personalize(request) = &backend.calls()[0] else {
            panic!("expected a personalize call");
        };
        assert_eq!(request.experience_level, ExperienceLevel::Beginner);
        assert_eq!(request.background, "other");
        assert_eq!(request.interests, vec!["robotics", "ai"]);
        assert_eq!(request.preferred_examples, "python");
        assert_eq!(
            request.content,
            "Sensors\nRobots perceive the world through sensors."
        );
    }

    #[tokio::test]
    async fn test_personalize_signed_in_reader() {
        let backend = Arc::new(MockBackend::healthy());
        let (client, store) = client_with(backend.clone());
        store
            .save(
                &Profile::new("ada@example.com", "Ada", ExperienceLevel::Advanced)
                    .with_languages([ProgrammingLanguage::Cpp]),
            )
            .unwrap();
        let page = chapter();

        let fetched = client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        assert_eq!(
            fetched.value().heading,
            "✨ Personalized for advanced learners:"
        );

        let Call::Personalize(request) = &backend.calls()[0] else {
            panic!("expected a personalize call");
        };
        assert_eq!(request.preferred_examples, "cpp");
        assert!(request.interests.is_empty());
    }

    #[tokio::test]
    async fn test_block_goes_after_heading_and_is_removed_on_deactivate() {
        let (client, _store) = client_with(Arc::new(MockBackend::healthy()));
        let page = chapter();

        client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        {
            let page = page.lock().await;
            let blocks = &page.article().unwrap().blocks;
            assert!(matches!(blocks[1], PageBlock::Augmentation(_)));
        }

        assert!(client.deactivate(AugmentationKind::Personalize, &page).await);
        assert!(!client.state().personalized);
        let page = page.lock().await;
        assert_eq!(page.article().unwrap().blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_inserts_fallback() {
        let (client, _store) = client_with(Arc::new(MockBackend::failing()));
        let page = chapter();

        let fetched = client
            .activate(AugmentationKind::Translate, &page)
            .await
            .unwrap();
        assert!(fetched.is_fallback());
        assert_eq!(fetched.value().body, TRANSLATE_FALLBACK);
        assert!(client.state().translated);

        let page = page.lock().await;
        assert!(page.is_rtl());
        let block = page.content_region().unwrap().block("urdu-notice").unwrap();
        assert_eq!(block.direction, TextDirection::Rtl);
    }

    #[tokio::test]
    async fn test_personalize_fallback_matches_level() {
        let backend = Arc::new(MockBackend::failing());
        let (client, store) = client_with(backend);
        store
            .save(&Profile::new("i@example.com", "Ivy", ExperienceLevel::Intermediate))
            .unwrap();
        let page = chapter();

        let fetched = client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        let expected = personalize_fallback(ExperienceLevel::Intermediate);
        assert!(
            fetched
                .value()
                .body
                .starts_with(truncate_chars(expected, 100))
        );
    }

    #[tokio::test]
    async fn test_partial_stored_record_drives_fallback_level() {
        let backend = Arc::new(MockBackend::failing_with(BackendError::Status {
            status: 500,
            detail: Some("Internal Server Error".to_string()),
        }));
        let slot = Arc::new(MemorySlot::new());
        slot.set(
            textbook_core::profile::DEFAULT_PROFILE_KEY,
            r#"{"experienceLevel":"advanced","interests":["Humanoids"]}"#,
        )
        .unwrap();
        let client = AugmentationClient::new(backend, ProfileStore::new(slot));
        let page = chapter();

        let fetched = client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        assert!(fetched.is_fallback());
        assert_eq!(
            fetched.value().heading,
            "✨ Personalized for advanced learners:"
        );
        let expected = personalize_fallback(ExperienceLevel::Advanced);
        assert!(
            fetched
                .value()
                .body
                .starts_with(truncate_chars(expected, 100))
        );
    }

    #[tokio::test]
    async fn test_translate_off_restores_ltr() {
        let (client, _store) = client_with(Arc::new(MockBackend::healthy()));
        let page = chapter();

        client
            .toggle(AugmentationKind::Translate, &page)
            .await
            .unwrap();
        assert!(page.lock().await.is_rtl());

        let toggled = client
            .toggle(AugmentationKind::Translate, &page)
            .await
            .unwrap();
        assert!(toggled.is_none());
        assert!(!page.lock().await.is_rtl());
        assert_eq!(client.state(), AugmentationState::default());
    }

    #[tokio::test]
    async fn test_no_content_region() {
        let backend = Arc::new(MockBackend::healthy());
        let (client, _store) = client_with(backend.clone());
        let page = Mutex::new(DocPage::empty());

        let err = client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap_err();
        assert_eq!(err, AugmentationError::NoContent);
        assert_eq!(err.to_string(), "Could not find content");
        assert!(backend.calls().is_empty());
        assert!(!client.is_busy(AugmentationKind::Personalize));
        assert!(!client.state().personalized);
    }

    #[tokio::test]
    async fn test_content_is_capped_per_kind() {
        let backend = Arc::new(MockBackend::healthy());
        let (client, _store) = client_with(backend.clone());
        let page = Mutex::new(DocPage::with_blocks(vec![PageBlock::Paragraph {
            text: "é".repeat(5000),
        }]));

        client
            .activate(AugmentationKind::Personalize, &page)
            .await
            .unwrap();
        client
            .activate(AugmentationKind::Translate, &page)
            .await
            .unwrap();

        let calls = backend.calls();
        let Call::Personalize(personalize) = &calls[0] else {
            panic!("expected a personalize call");
        };
        let Call::Translate(translate) = &calls[1] else {
            panic!("expected a translate call");
        };
        assert_eq!(personalize.content.chars().count(), 2000);
        assert_eq!(translate.content.chars().count(), 1500);
        assert_eq!(translate.target_language, "urdu");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_single_flight_per_kind() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(MockBackend::gated(gate.clone()));
        let (client, _store) = client_with(backend.clone());
        let client = Arc::new(client);
        let page = Arc::new(chapter());

        let first = {
            let client = client.clone();
            let page = page.clone();
            tokio::spawn(async move {
                client
                    .activate(AugmentationKind::Personalize, page.as_ref())
                    .await
            })
        };
        while !client.is_busy(AugmentationKind::Personalize) {
            tokio::task::yield_now().await;
        }

        let second = client
            .activate(AugmentationKind::Personalize, page.as_ref())
            .await;
        assert_eq!(
            second.unwrap_err(),
            AugmentationError::Busy(AugmentationKind::Personalize)
        );
        // The other toggle is independent.
        assert!(!client.is_busy(AugmentationKind::Translate));

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!client.is_busy(AugmentationKind::Personalize));
        assert_eq!(backend.calls().len(), 1);
    }
}
