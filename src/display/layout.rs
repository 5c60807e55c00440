//! Caption layout — word-wrapping and page cycling.
//!
//! A reply is wrapped to the panel's character width and shown two lines at
//! a time in the body region.  [`CaptionPager`] cycles through the pages at
//! a fixed interval and wraps back to the first page after the last, so a
//! long reply scrolls forever until the caption task is cancelled.

use std::ops::Range;

/// Text columns on the 128-px panel with the 6-px font.
pub const PANEL_COLUMNS: usize = 21;

/// Caption lines visible at once in the body region.
pub const LINES_PER_PAGE: usize = 2;

// ---------------------------------------------------------------------------
// wrap_reply
// ---------------------------------------------------------------------------

/// Word-wrap `text` to at most `columns` characters per line.
///
/// Words longer than `columns` are broken mid-word so every returned line
/// fits the panel.  For ordinary prose, joining the lines with single spaces
/// reconstructs the original word sequence.
pub fn wrap_reply(text: &str, columns: usize) -> Vec<String> {
    textwrap::wrap(text, columns)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// CaptionPager
// ---------------------------------------------------------------------------

/// Cycles a window of [`LINES_PER_PAGE`] lines over a wrapped caption.
///
/// ```
/// use quip::display::CaptionPager;
///
/// let mut pager = CaptionPager::new(5); // 5 lines → 3 pages
/// assert_eq!(pager.window(), 0..2);
/// pager.advance();
/// assert_eq!(pager.window(), 2..4);
/// pager.advance();
/// assert_eq!(pager.window(), 4..5); // last page is short
/// pager.advance();
/// assert_eq!(pager.window(), 0..2); // wrapped back to the start
/// ```
#[derive(Debug, Clone)]
pub struct CaptionPager {
    line_count: usize,
    page: usize,
}

impl CaptionPager {
    /// Create a pager over `line_count` wrapped lines, positioned on page 0.
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count,
            page: 0,
        }
    }

    /// Number of pages; at least 1 even for an empty caption.
    pub fn page_count(&self) -> usize {
        self.line_count.div_ceil(LINES_PER_PAGE).max(1)
    }

    /// Line index range of the current page.
    ///
    /// The final page may hold a single line when the line count is odd.
    pub fn window(&self) -> Range<usize> {
        let start = self.page * LINES_PER_PAGE;
        let end = (start + LINES_PER_PAGE).min(self.line_count);
        start..end
    }

    /// Move to the next page, wrapping to page 0 after the last.
    pub fn advance(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- wrap_reply --------------------------------------------------------

    #[test]
    fn every_line_fits_the_panel() {
        let text = "Response: It is five o'clock somewhere, probably where you left your watch";
        for line in wrap_reply(text, PANEL_COLUMNS) {
            assert!(
                line.chars().count() <= PANEL_COLUMNS,
                "line too wide: {line:?}"
            );
        }
    }

    #[test]
    fn rejoining_lines_reconstructs_the_words() {
        let text = "What time is it in the land of perpetually late buses";
        let lines = wrap_reply(text, PANEL_COLUMNS);
        assert!(lines.len() > 1, "text should need wrapping");
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn short_text_is_a_single_line() {
        let lines = wrap_reply("hello", PANEL_COLUMNS);
        assert_eq!(lines, vec!["hello".to_string()]);
    }

    #[test]
    fn empty_text_wraps_to_one_empty_line() {
        // textwrap keeps one (empty) line for empty input.
        let lines = wrap_reply("", PANEL_COLUMNS);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn overlong_word_is_broken_to_fit() {
        let text = "a".repeat(PANEL_COLUMNS * 2 + 3);
        let lines = wrap_reply(&text, PANEL_COLUMNS);
        assert!(lines.len() >= 3);
        for line in &lines {
            assert!(line.chars().count() <= PANEL_COLUMNS);
        }
    }

    // ---- CaptionPager ------------------------------------------------------

    #[test]
    fn even_line_count_pages_cleanly() {
        let mut pager = CaptionPager::new(4);
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.window(), 0..2);
        pager.advance();
        assert_eq!(pager.window(), 2..4);
        pager.advance();
        assert_eq!(pager.window(), 0..2);
    }

    #[test]
    fn odd_line_count_shows_a_short_last_page() {
        let mut pager = CaptionPager::new(3);
        assert_eq!(pager.page_count(), 2);
        pager.advance();
        assert_eq!(pager.window(), 2..3);
    }

    /// Every line is visible at some point in a full cycle — the last page
    /// is never skipped, regardless of parity.
    #[test]
    fn full_cycle_covers_every_line() {
        for line_count in 1..=8 {
            let mut pager = CaptionPager::new(line_count);
            let mut seen = vec![false; line_count];
            for _ in 0..pager.page_count() {
                for i in pager.window() {
                    seen[i] = true;
                }
                pager.advance();
            }
            assert!(
                seen.iter().all(|&s| s),
                "lines missed with line_count={line_count}: {seen:?}"
            );
            // …and we are back on page 0.
            assert_eq!(pager.window().start, 0);
        }
    }

    #[test]
    fn single_line_caption_stays_on_page_zero() {
        let mut pager = CaptionPager::new(1);
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.window(), 0..1);
        pager.advance();
        assert_eq!(pager.window(), 0..1);
    }

    #[test]
    fn empty_caption_has_an_empty_window() {
        let pager = CaptionPager::new(0);
        assert_eq!(pager.page_count(), 1);
        assert!(pager.window().is_empty());
    }
}
