//! Core `Panel` trait and the test double.
//!
//! [`Panel`] is the narrow seam between the orchestrator and the physical
//! display: clear the framebuffer, erase or fill a rectangular region, draw
//! a text run at a pixel position, and push the framebuffer to the glass.
//! Rotation is fixed when the production driver is constructed.
//!
//! [`MockPanel`] (available under `#[cfg(test)]`) records every operation in
//! a shared journal so tests can assert on what was drawn.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A pixel-space rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ---------------------------------------------------------------------------
// PanelError
// ---------------------------------------------------------------------------

/// Errors surfaced by a panel implementation.
///
/// The variants carry stringified driver errors so that callers stay
/// independent of the underlying bus/driver crates.
#[derive(Debug, Clone, Error)]
pub enum PanelError {
    /// The hardware bus could not be acquired.
    #[error("failed to open display bus: {0}")]
    Bus(String),

    /// The driver rejected the panel initialisation sequence.
    #[error("display initialisation failed: {0}")]
    Init(String),

    /// A framebuffer draw operation failed.
    #[error("draw operation failed: {0}")]
    Draw(String),

    /// Pushing the framebuffer to the physical panel failed.
    #[error("flush to panel failed: {0}")]
    Flush(String),
}

// ---------------------------------------------------------------------------
// Panel trait
// ---------------------------------------------------------------------------

/// Object-safe interface to a monochrome pixel panel.
///
/// Implementations must be `Send` so the panel singleton can live behind an
/// `Arc<Mutex<Box<dyn Panel>>>` shared by the animation tasks.  Draw calls
/// mutate an in-memory framebuffer; nothing is visible until [`flush`].
///
/// [`flush`]: Panel::flush
pub trait Panel: Send {
    /// Blank the entire framebuffer.
    fn clear(&mut self) -> Result<(), PanelError>;

    /// Set every pixel in `region` to `on` (true = lit).
    fn fill_region(&mut self, region: Rect, on: bool) -> Result<(), PanelError>;

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), PanelError>;

    /// Push the framebuffer to the physical panel.
    fn flush(&mut self) -> Result<(), PanelError>;
}

// Compile-time assertion: Box<dyn Panel> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Panel>) {}
};

// ---------------------------------------------------------------------------
// MockPanel  (test-only)
// ---------------------------------------------------------------------------

/// A recorded panel operation.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOp {
    Clear,
    Fill(Rect, bool),
    Text { x: i32, y: i32, text: String },
    Flush,
}

/// Test double that records operations into a shared journal.
///
/// Clone the journal handle before handing the panel to a [`Screen`] so the
/// test can inspect what was drawn afterwards.
///
/// [`Screen`]: crate::display::Screen
#[cfg(test)]
pub struct MockPanel {
    journal: std::sync::Arc<std::sync::Mutex<Vec<PanelOp>>>,
}

#[cfg(test)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            journal: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded operations.
    pub fn journal(&self) -> std::sync::Arc<std::sync::Mutex<Vec<PanelOp>>> {
        std::sync::Arc::clone(&self.journal)
    }

    fn push(&self, op: PanelOp) {
        self.journal.lock().unwrap().push(op);
    }
}

#[cfg(test)]
impl Panel for MockPanel {
    fn clear(&mut self) -> Result<(), PanelError> {
        self.push(PanelOp::Clear);
        Ok(())
    }

    fn fill_region(&mut self, region: Rect, on: bool) -> Result<(), PanelError> {
        self.push(PanelOp::Fill(region, on));
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), PanelError> {
        self.push(PanelOp::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PanelError> {
        self.push(PanelOp::Flush);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_operations_in_order() {
        let mut panel = MockPanel::new();
        let journal = panel.journal();

        panel.clear().unwrap();
        panel.draw_text(0, 0, "IP: 10.0.0.2").unwrap();
        panel.fill_region(Rect::new(0, 10, 128, 22), false).unwrap();
        panel.flush().unwrap();

        let ops = journal.lock().unwrap();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], PanelOp::Clear);
        assert!(matches!(&ops[1], PanelOp::Text { text, .. } if text == "IP: 10.0.0.2"));
        assert_eq!(ops[3], PanelOp::Flush);
    }

    #[test]
    fn box_dyn_panel_compiles() {
        // If this test compiles, the trait is object-safe.
        let mut panel: Box<dyn Panel> = Box::new(MockPanel::new());
        panel.clear().unwrap();
    }

    #[test]
    fn panel_error_display_names_the_stage() {
        assert!(PanelError::Bus("no such device".into())
            .to_string()
            .contains("bus"));
        assert!(PanelError::Flush("i2c write failed".into())
            .to_string()
            .contains("flush"));
    }
}
