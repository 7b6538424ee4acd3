//! Consent controller: page-ready wiring, visibility, decision recording.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use consentry_core::{classify, ConsentDecision, ConsentState};
use consentry_store::StorageBackend;

use crate::config::BannerConfig;
use crate::dom::{BannerSurface, DisplayMode, PageDocument};

/// Drives the consent banner from the persisted choice.
///
/// Created once per page load and mounted from the page-ready callback.
/// Missing elements degrade the controller instead of failing it: a
/// missing control leaves that action unavailable, a missing banner makes
/// visibility a no-op. Each miss is reported on the diagnostic channel.
pub struct ConsentController {
    config: BannerConfig,
    storage: Arc<dyn StorageBackend>,
    banner: RwLock<Option<Arc<dyn BannerSurface>>>,
    mounted: AtomicBool,
}

impl ConsentController {
    /// Create a controller over a storage backend.
    pub fn new(storage: Arc<dyn StorageBackend>, config: BannerConfig) -> Self {
        Self {
            config,
            storage,
            banner: RwLock::new(None),
            mounted: AtomicBool::new(false),
        }
    }

    // ---------------------------------------------------------------
    // Mount (page-ready entry point)
    // ---------------------------------------------------------------

    /// Wire the controller to a page. Single-shot per controller; a
    /// repeat call is ignored with a warning.
    ///
    /// Looks up the banner and both controls by their configured
    /// identifiers, applies the initial visibility from the stored
    /// consent value, and binds the accept/decline handlers on whichever
    /// controls exist.
    pub fn mount(self: &Arc<Self>, page: &dyn PageDocument) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            warn!("Consent controller already mounted, ignoring");
            return;
        }

        let banner = page.banner(&self.config.banner_id);
        if banner.is_none() {
            error!(
                "Consent banner element #{} not found",
                self.config.banner_id
            );
        }
        *self.banner.write() = banner;

        self.apply_initial_visibility();
        self.bind_controls(page);
    }

    fn apply_initial_visibility(&self) {
        let stored = match self.storage.get(&self.config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Consent read failed, treating as undecided: {}", e);
                None
            }
        };
        debug!(
            "Stored value under {:?} on page load: {:?}",
            self.config.storage_key, stored
        );

        let banner = self.banner.read();
        let Some(banner) = banner.as_ref() else {
            return;
        };

        match classify(stored.as_deref()) {
            ConsentState::Undecided => {
                info!("No usable consent recorded, showing banner");
                banner.set_display(DisplayMode::Flex);
            }
            ConsentState::Decided(value) => {
                // Hide explicitly rather than rely on the stylesheet default
                info!("Consent {:?} found, hiding banner", value);
                banner.set_display(DisplayMode::None);
            }
        }
    }

    fn bind_controls(self: &Arc<Self>, page: &dyn PageDocument) {
        match page.control(&self.config.accept_id) {
            Some(control) => {
                let controller = Arc::clone(self);
                control.on_activate(Box::new(move || controller.accept()));
            }
            None => error!("Accept control #{} not found", self.config.accept_id),
        }

        match page.control(&self.config.decline_id) {
            Some(control) => {
                let controller = Arc::clone(self);
                control.on_activate(Box::new(move || controller.decline()));
            }
            None => error!("Decline control #{} not found", self.config.decline_id),
        }
    }

    // ---------------------------------------------------------------
    // Decisions
    // ---------------------------------------------------------------

    /// Record an accepted decision and hide the banner.
    pub fn accept(&self) {
        self.record(ConsentDecision::Accepted);
    }

    /// Record a declined decision and hide the banner.
    pub fn decline(&self) {
        self.record(ConsentDecision::Declined);
    }

    fn record(&self, decision: ConsentDecision) {
        if let Err(e) = self
            .storage
            .set(&self.config.storage_key, decision.as_str())
        {
            warn!("Failed to persist consent {}: {}", decision, e);
        } else {
            info!("Consent {} recorded", decision);
        }

        if let Some(banner) = self.banner.read().as_ref() {
            banner.set_display(DisplayMode::None);
        }
    }

    // ---------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------

    /// Classify the currently stored value.
    pub fn state(&self) -> ConsentState {
        let stored = self.storage.get(&self.config.storage_key).ok().flatten();
        classify(stored.as_deref())
    }

    /// The stored decision, if it is a recognized one.
    pub fn decision(&self) -> Option<ConsentDecision> {
        self.state().decision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use consentry_store::MemoryStorage;

    use crate::page::InMemoryPage;

    fn mounted_controller(
        storage: Arc<dyn StorageBackend>,
        page: &InMemoryPage,
    ) -> Arc<ConsentController> {
        let controller = Arc::new(ConsentController::new(storage, BannerConfig::default()));
        controller.mount(page);
        controller
    }

    #[test]
    fn test_fresh_storage_shows_banner() {
        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        mounted_controller(Arc::new(MemoryStorage::new()), &page);
        assert_eq!(banner.display(), DisplayMode::Flex);
    }

    #[test]
    fn test_recorded_consent_hides_banner() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("cookieConsent", "accepted").unwrap();

        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        mounted_controller(storage, &page);
        assert_eq!(banner.display(), DisplayMode::None);
        assert!(banner.touched());
    }

    #[test]
    fn test_sentinel_strings_show_banner() {
        for value in ["null", "undefined", ""] {
            let storage = Arc::new(MemoryStorage::new());
            storage.set("cookieConsent", value).unwrap();

            let mut page = InMemoryPage::new();
            let banner = page.add_banner("cookieConsentBanner");
            mounted_controller(storage, &page);
            assert_eq!(banner.display(), DisplayMode::Flex, "value {:?}", value);
        }
    }

    #[test]
    fn test_unrecognized_value_hides_banner() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("cookieConsent", "partial").unwrap();

        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        mounted_controller(storage, &page);
        assert_eq!(banner.display(), DisplayMode::None);
    }

    #[test]
    fn test_accept_records_and_hides() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        let accept = page.add_control("acceptCookies");
        page.add_control("declineCookies");

        let controller = mounted_controller(storage.clone(), &page);
        accept.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("accepted")
        );
        assert_eq!(banner.display(), DisplayMode::None);
        assert_eq!(controller.decision(), Some(ConsentDecision::Accepted));
    }

    #[test]
    fn test_decline_records_and_hides() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        page.add_control("acceptCookies");
        let decline = page.add_control("declineCookies");

        mounted_controller(storage.clone(), &page);
        decline.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("declined")
        );
        assert_eq!(banner.display(), DisplayMode::None);
    }

    #[test]
    fn test_double_activation_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        let accept = page.add_control("acceptCookies");
        page.add_control("declineCookies");

        mounted_controller(storage.clone(), &page);
        accept.activate();
        accept.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("accepted")
        );
        assert_eq!(banner.display(), DisplayMode::None);
    }

    #[test]
    fn test_flipping_before_hide_rewrites_value() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        page.add_banner("cookieConsentBanner");
        let accept = page.add_control("acceptCookies");
        let decline = page.add_control("declineCookies");

        mounted_controller(storage.clone(), &page);
        accept.activate();
        decline.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("declined")
        );
    }

    #[test]
    fn test_missing_banner_still_records() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        let accept = page.add_control("acceptCookies");
        page.add_control("declineCookies");

        mounted_controller(storage.clone(), &page);
        accept.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("accepted")
        );
    }

    #[test]
    fn test_missing_control_leaves_other_working() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        let banner = page.add_banner("cookieConsentBanner");
        let decline = page.add_control("declineCookies");

        mounted_controller(storage.clone(), &page);
        decline.activate();

        assert_eq!(
            storage.get("cookieConsent").unwrap().as_deref(),
            Some("declined")
        );
        assert_eq!(banner.display(), DisplayMode::None);
    }

    #[test]
    fn test_empty_page_mounts_without_effect() {
        let storage = Arc::new(MemoryStorage::new());
        let page = InMemoryPage::new();
        let controller = mounted_controller(storage.clone(), &page);
        assert_eq!(controller.state(), ConsentState::Undecided);
        assert_eq!(storage.get("cookieConsent").unwrap(), None);
    }

    #[test]
    fn test_second_mount_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        let mut page = InMemoryPage::new();
        page.add_banner("cookieConsentBanner");
        let accept = page.add_control("acceptCookies");
        page.add_control("declineCookies");

        let controller = mounted_controller(storage, &page);
        controller.mount(&page);

        // Handlers were bound once, not twice
        assert_eq!(accept.handler_count(), 1);
    }
}
