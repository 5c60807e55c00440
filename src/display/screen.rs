//! Frame rendering over a shared [`Panel`].
//!
//! [`Screen`] owns the panel singleton behind `Arc<Mutex<…>>` and is cheap
//! to clone, so the status-animation and caption tasks can each hold a
//! handle.  Each frame method takes the lock, draws, flushes and releases —
//! the lock is never held across an await point.
//!
//! # Panel geometry (128×32, 6×10 px font)
//!
//! ```text
//! y=0   IP: 192.168.1.17        ← persistent header, drawn once at boot
//! y=10  first caption line   ┐
//! y=20  second caption line  ┘  body region, or the status line at y=20
//! ```

use std::sync::{Arc, Mutex};

use crate::display::panel::{Panel, PanelError, Rect};

/// Pixel row of the persistent header line.
pub const HEADER_Y: i32 = 0;
/// Pixel row of the first caption line.
pub const BODY_Y: i32 = 10;
/// Pixel row of the status-animation line.
pub const STATUS_Y: i32 = 20;
/// Vertical pitch between caption lines.
pub const LINE_PITCH: i32 = 10;
/// The body region below the header; erased before every frame.
pub const BODY_REGION: Rect = Rect::new(0, 10, 128, 22);

/// Shared renderer for the three frame kinds the appliance draws.
#[derive(Clone)]
pub struct Screen {
    panel: Arc<Mutex<Box<dyn Panel>>>,
    columns: usize,
}

impl Screen {
    /// Wrap `panel` for shared use.  `columns` is the text width used when
    /// wrapping captions (see [`crate::display::PANEL_COLUMNS`]).
    pub fn new(panel: Box<dyn Panel>, columns: usize) -> Self {
        Self {
            panel: Arc::new(Mutex::new(panel)),
            columns,
        }
    }

    /// Caption text width in characters.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Clear the panel and draw the persistent header line.
    pub fn show_header(&self, header: &str) -> Result<(), PanelError> {
        let mut panel = self.lock();
        panel.clear()?;
        panel.draw_text(0, HEADER_Y, header)?;
        panel.flush()
    }

    /// Draw one status-animation frame: `label` plus `dots` trailing dots on
    /// the status line.  The header is left untouched.
    pub fn status_frame(&self, label: &str, dots: usize) -> Result<(), PanelError> {
        let text = format!("{label}{}", ".".repeat(dots));
        let mut panel = self.lock();
        panel.fill_region(BODY_REGION, false)?;
        panel.draw_text(0, STATUS_Y, &text)?;
        panel.flush()
    }

    /// Draw one caption frame: up to two wrapped lines in the body region.
    /// The header is left untouched.
    pub fn caption_frame(&self, lines: &[String]) -> Result<(), PanelError> {
        let mut panel = self.lock();
        panel.fill_region(BODY_REGION, false)?;
        for (i, line) in lines.iter().take(2).enumerate() {
            panel.draw_text(0, BODY_Y + i as i32 * LINE_PITCH, line)?;
        }
        panel.flush()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn Panel>> {
        // A poisoned panel lock means a draw call panicked; the framebuffer
        // state is still usable, so keep rendering.
        self.panel.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::panel::{MockPanel, PanelOp};
    use crate::display::PANEL_COLUMNS;

    fn mock_screen() -> (Screen, std::sync::Arc<Mutex<Vec<PanelOp>>>) {
        let panel = MockPanel::new();
        let journal = panel.journal();
        (Screen::new(Box::new(panel), PANEL_COLUMNS), journal)
    }

    #[test]
    fn header_clears_then_draws_then_flushes() {
        let (screen, journal) = mock_screen();
        screen.show_header("IP: 10.1.1.4").unwrap();

        let ops = journal.lock().unwrap();
        assert_eq!(ops[0], PanelOp::Clear);
        assert!(
            matches!(&ops[1], PanelOp::Text { x: 0, y, text } if *y == HEADER_Y && text == "IP: 10.1.1.4")
        );
        assert_eq!(*ops.last().unwrap(), PanelOp::Flush);
    }

    #[test]
    fn status_frame_erases_only_the_body() {
        let (screen, journal) = mock_screen();
        screen.status_frame("Listening", 2).unwrap();

        let ops = journal.lock().unwrap();
        assert_eq!(ops[0], PanelOp::Fill(BODY_REGION, false));
        assert!(
            matches!(&ops[1], PanelOp::Text { y, text, .. } if *y == STATUS_Y && text == "Listening..")
        );
        // No Clear — the header must survive.
        assert!(!ops.iter().any(|op| *op == PanelOp::Clear));
    }

    #[test]
    fn status_frame_with_zero_dots_is_bare_label() {
        let (screen, journal) = mock_screen();
        screen.status_frame("Listening", 0).unwrap();

        let ops = journal.lock().unwrap();
        assert!(matches!(&ops[1], PanelOp::Text { text, .. } if text == "Listening"));
    }

    #[test]
    fn caption_frame_draws_two_lines_on_pitch() {
        let (screen, journal) = mock_screen();
        let lines = vec!["first line".to_string(), "second line".to_string()];
        screen.caption_frame(&lines).unwrap();

        let ops = journal.lock().unwrap();
        assert!(
            matches!(&ops[1], PanelOp::Text { y, text, .. } if *y == BODY_Y && text == "first line")
        );
        assert!(
            matches!(&ops[2], PanelOp::Text { y, text, .. } if *y == BODY_Y + LINE_PITCH && text == "second line")
        );
    }

    #[test]
    fn caption_frame_caps_at_two_lines() {
        let (screen, journal) = mock_screen();
        let lines = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        screen.caption_frame(&lines).unwrap();

        let texts = journal
            .lock()
            .unwrap()
            .iter()
            .filter(|op| matches!(op, PanelOp::Text { .. }))
            .count();
        assert_eq!(texts, 2);
    }

    #[test]
    fn clones_share_the_same_panel() {
        let (screen, journal) = mock_screen();
        let other = screen.clone();
        screen.status_frame("Listening", 0).unwrap();
        other.status_frame("Listening", 1).unwrap();
        // Both frames landed in the one journal.
        let flushes = journal
            .lock()
            .unwrap()
            .iter()
            .filter(|op| **op == PanelOp::Flush)
            .count();
        assert_eq!(flushes, 2);
    }
}
