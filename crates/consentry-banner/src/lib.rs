//! Consentry Banner: cookie-consent banner controller.
//!
//! Shows or hides a consent banner from the persisted user choice and
//! records the choice when an accept or decline control is activated.
//! The controller reaches the page and storage only through capability
//! traits, so the whole flow runs headlessly.

pub mod config;
pub mod controller;
pub mod dom;
pub mod page;

pub use config::BannerConfig;
pub use controller::ConsentController;
pub use dom::{ActivatableControl, BannerSurface, DisplayMode, PageDocument};
pub use page::{InMemoryBanner, InMemoryControl, InMemoryPage};
