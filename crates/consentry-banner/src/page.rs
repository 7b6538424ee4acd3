//! In-memory page elements for headless hosts and tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::dom::{ActivatableControl, ActivationHandler, BannerSurface, DisplayMode, PageDocument};

/// Banner element holding a display mode. Starts hidden, matching the
/// stylesheet's default for the banner.
#[derive(Default)]
pub struct InMemoryBanner {
    display: RwLock<Option<DisplayMode>>,
}

impl InMemoryBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the controller has set a display mode at all.
    pub fn touched(&self) -> bool {
        self.display.read().is_some()
    }
}

impl BannerSurface for InMemoryBanner {
    fn set_display(&self, mode: DisplayMode) {
        *self.display.write() = Some(mode);
    }

    fn display(&self) -> DisplayMode {
        self.display.read().unwrap_or(DisplayMode::None)
    }
}

/// Control that runs registered handlers synchronously on `activate`.
#[derive(Default)]
pub struct InMemoryControl {
    handlers: RwLock<Vec<ActivationHandler>>,
}

impl InMemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a user activation.
    pub fn activate(&self) {
        for handler in self.handlers.read().iter() {
            handler();
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl ActivatableControl for InMemoryControl {
    fn on_activate(&self, handler: ActivationHandler) {
        self.handlers.write().push(handler);
    }
}

/// Page holding elements by identifier.
#[derive(Default)]
pub struct InMemoryPage {
    banners: HashMap<String, Arc<InMemoryBanner>>,
    controls: HashMap<String, Arc<InMemoryControl>>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a banner element under `id`, returning a handle for assertions.
    pub fn add_banner(&mut self, id: &str) -> Arc<InMemoryBanner> {
        let banner = Arc::new(InMemoryBanner::new());
        self.banners.insert(id.to_string(), Arc::clone(&banner));
        banner
    }

    /// Add a control under `id`, returning a handle for activation.
    pub fn add_control(&mut self, id: &str) -> Arc<InMemoryControl> {
        let control = Arc::new(InMemoryControl::new());
        self.controls.insert(id.to_string(), Arc::clone(&control));
        control
    }
}

impl PageDocument for InMemoryPage {
    fn banner(&self, id: &str) -> Option<Arc<dyn BannerSurface>> {
        self.banners
            .get(id)
            .map(|b| Arc::clone(b) as Arc<dyn BannerSurface>)
    }

    fn control(&self, id: &str) -> Option<Arc<dyn ActivatableControl>> {
        self.controls
            .get(id)
            .map(|c| Arc::clone(c) as Arc<dyn ActivatableControl>)
    }
}
