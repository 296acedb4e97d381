//! Page-level presentation logic shared by the portal pages.
//!
//! - `chrome`: navigation/footer fragments and the mobile menu toggle
//! - `theme`: light/dark resolution, persistence, and the chip palette
//! - `detail`: the agent detail-page populator

pub mod chrome;
pub mod detail;
pub mod theme;

pub use detail::DetailPage;
pub use theme::{Theme, ThemeController};
