//! Page capability traits the controller is wired against.
//!
//! The traits stand in for the document the banner lives in. A real host
//! binds them to its UI toolkit; `page.rs` ships in-memory implementations
//! for headless hosts and tests.

use std::sync::Arc;

/// CSS display value the banner toggles between.
///
/// The stylesheet lays the banner out with flex, so visible means `flex`
/// and hidden means `none`. Nothing else about layout is owned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Flex,
    None,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handler registered against an activatable control.
pub type ActivationHandler = Box<dyn Fn() + Send + Sync>;

/// The banner element. The controller only ever toggles its display mode.
pub trait BannerSurface: Send + Sync {
    fn set_display(&self, mode: DisplayMode);

    fn display(&self) -> DisplayMode;
}

/// A control the user can activate (a click target in a real document).
///
/// Registration is additive; activating the control runs every handler
/// registered so far, synchronously, on the caller's thread.
pub trait ActivatableControl: Send + Sync {
    fn on_activate(&self, handler: ActivationHandler);
}

/// Element lookup by fixed identifier.
///
/// Each lookup independently succeeds or fails; a missing element is an
/// ordinary None, never an error.
pub trait PageDocument {
    fn banner(&self, id: &str) -> Option<Arc<dyn BannerSurface>>;

    fn control(&self, id: &str) -> Option<Arc<dyn ActivatableControl>>;
}
