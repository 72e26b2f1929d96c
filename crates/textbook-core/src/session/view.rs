//! Per-fragment view of who is signed in, plus the logout action.

use super::event::SessionEvent;
use super::notifier::SessionNotifier;
use crate::error::Result;
use crate::profile::{Profile, ProfileStore};

/// What an independently mounted UI fragment (e.g. the navbar button)
/// knows about the session.
///
/// Starts from whatever the store holds and follows login/logout events
/// from then on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    current: Option<Profile>,
}

impl SessionView {
    pub fn from_store(store: &ProfileStore) -> Self {
        Self {
            current: store.load(),
        }
    }

    pub fn apply(&mut self, event: &SessionEvent) {
        self.current = event.profile().cloned();
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// `"Ada (advanced)"` when signed in, `"Sign In"` otherwise.
    pub fn label(&self) -> String {
        match &self.current {
            Some(profile) => format!("{} ({})", profile.name, profile.experience_level),
            None => "Sign In".to_string(),
        }
    }
}

/// Removes the stored profile and tells every listener.
pub fn logout(store: &ProfileStore, notifier: &SessionNotifier) -> Result<()> {
    store.clear()?;
    notifier.announce_logout();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExperienceLevel, PersonalizationHints};
    use crate::storage::MemorySlot;
    use std::sync::Arc;

    #[test]
    fn test_view_follows_events() {
        let store = ProfileStore::new(Arc::new(MemorySlot::new()));
        let mut view = SessionView::from_store(&store);
        assert_eq!(view.label(), "Sign In");

        let ada = Profile::new("ada@example.com", "Ada", ExperienceLevel::Advanced);
        view.apply(&SessionEvent::Login(ada));
        assert!(view.is_signed_in());
        assert_eq!(view.label(), "Ada (advanced)");

        view.apply(&SessionEvent::Logout);
        assert!(!view.is_signed_in());
    }

    #[test]
    fn test_view_starts_from_stored_profile() {
        let store = ProfileStore::new(Arc::new(MemorySlot::new()));
        store
            .save(&Profile::new("bo@example.com", "Bo", ExperienceLevel::Intermediate))
            .unwrap();
        assert_eq!(SessionView::from_store(&store).label(), "Bo (intermediate)");
    }

    #[test]
    fn test_logout_clears_store_and_announces() {
        let store = ProfileStore::new(Arc::new(MemorySlot::new()));
        let notifier = SessionNotifier::new();
        let mut listener = notifier.subscribe();
        store
            .save(
                &Profile::new("ada@example.com", "Ada", ExperienceLevel::Advanced)
                    .with_interests([crate::profile::Interest::Humanoids]),
            )
            .unwrap();

        logout(&store, &notifier).unwrap();

        assert!(store.load().is_none());
        assert_eq!(listener.try_recv(), Some(SessionEvent::Logout));
        assert_eq!(
            PersonalizationHints::from_profile(store.load().as_ref()),
            PersonalizationHints::anonymous()
        );
    }
}
