//! Status display — SSD1306 panel driver seam and frame rendering.
//!
//! # Architecture
//!
//! ```text
//! Screen (header / status / caption frames)
//!    │ Arc<Mutex<Box<dyn Panel>>>
//!    ▼
//! Panel (trait: clear / fill_region / draw_text / flush)
//!    │
//!    ├─ OledPanel — ssd1306 buffered-graphics driver on Linux I2C
//!    └─ MockPanel — records draw operations (test-only)
//! ```
//!
//! The panel is a 128×32 monochrome OLED with a 6×10 px font, giving
//! [`layout::PANEL_COLUMNS`] (21) text columns and three 10-px text rows:
//! a persistent header (IP address) at y = 0 and a two-line body below it.

pub mod layout;
pub mod oled;
pub mod panel;
pub mod screen;

pub use layout::{wrap_reply, CaptionPager, PANEL_COLUMNS};
pub use oled::OledPanel;
pub use panel::{Panel, PanelError, Rect};
pub use screen::Screen;

// test-only re-export so other modules' tests can build a Screen without
// `use quip::display::panel::MockPanel`.
#[cfg(test)]
pub use panel::{MockPanel, PanelOp};
