//! Pointer and scroll tracking for camera parallax.
//!
//! Two independent trackers each own a single mutable sample that is
//! overwritten by incoming events and read by the frame loop. This is a
//! latest-value-wins shared sample, not a queue: reads never block, there
//! is no backlog, and a one-event-stale read is acceptable.

use glam::Vec2;

/// Platform-agnostic input events forwarded by the embedding surface.
///
/// The viewer converts raw window events into these; headless consumers
/// can synthesize them directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute position, in physical pixels.
    PointerMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Wheel scroll over the virtual document, in physical pixels.
    /// Positive scrolls toward the end of the document.
    Scrolled {
        /// Scroll amount in physical pixels.
        delta: f32,
    },
}

/// Snapshot of both trackers, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    /// Pointer position normalized to `[-1, 1]` on both axes.
    pub pointer: Vec2,
    /// Scroll progress in `[0, 1]` over the virtual document.
    pub scroll: f32,
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

/// Normalizes absolute pointer coordinates into `[-1, 1]²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    sample: Vec2,
}

impl PointerTracker {
    /// Record a pointer position given the current viewport size.
    /// Both position and size are in the same (physical-pixel) units.
    pub fn update(&mut self, x: f32, y: f32, viewport: Vec2) {
        let w = viewport.x.max(1.0);
        let h = viewport.y.max(1.0);
        self.sample = Vec2::new((x / w - 0.5) * 2.0, (y / h - 0.5) * 2.0);
    }

    /// Latest normalized sample.
    #[must_use]
    pub fn sample(&self) -> Vec2 {
        self.sample
    }
}

// ---------------------------------------------------------------------------
// Scroll
// ---------------------------------------------------------------------------

/// Accumulates wheel deltas into a clamped offset over a virtual document
/// and exposes normalized progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollTracker {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
}

impl ScrollTracker {
    /// Update the document extent. The offset is re-clamped so shrinking
    /// the document never leaves it out of range.
    pub fn set_extent(&mut self, viewport_height: f32, content_height: f32) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Scroll by a pixel delta (positive = toward the document end).
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll progress in `[0, 1]`.
    ///
    /// Exactly `0` when the scrollable span is non-positive (document no
    /// taller than the viewport); the denominator is clamped so a
    /// degenerate measurement can never divide by zero.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let span = self.content_height - self.viewport_height;
        if span <= 0.0 {
            return 0.0;
        }
        (self.offset / span.max(1.0)).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Combined state
// ---------------------------------------------------------------------------

/// Both trackers plus the viewport measurements they normalize against.
///
/// Owned by the engine; dropped with it, so a remount starts from a fresh
/// zero sample with nothing left registered anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pointer: PointerTracker,
    scroll: ScrollTracker,
    viewport: Vec2,
}

impl InputState {
    /// Fresh state with a zero sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new viewport measurements (physical pixels) and the virtual
    /// document height derived from them.
    pub fn set_viewport(&mut self, width: f32, height: f32, pages: f32) {
        self.viewport = Vec2::new(width, height);
        self.scroll.set_extent(height, height * pages.max(0.0));
    }

    /// Apply one event. Synchronous, non-blocking, latest-wins.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer.update(x, y, self.viewport);
            }
            InputEvent::Scrolled { delta } => self.scroll.scroll_by(delta),
        }
    }

    /// Snapshot the latest samples for the frame loop.
    #[must_use]
    pub fn sample(&self) -> InputSample {
        InputSample {
            pointer: self.pointer.sample(),
            scroll: self.scroll.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(width: f32, height: f32, pages: f32) -> InputState {
        let mut s = InputState::new();
        s.set_viewport(width, height, pages);
        s
    }

    #[test]
    fn pointer_center_is_origin() {
        let mut s = state(1000.0, 500.0, 5.0);
        s.handle_event(InputEvent::PointerMoved { x: 500.0, y: 250.0 });
        assert_eq!(s.sample().pointer, Vec2::ZERO);
    }

    #[test]
    fn pointer_corners_hit_unit_bounds() {
        let mut s = state(1000.0, 500.0, 5.0);
        s.handle_event(InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        assert_eq!(s.sample().pointer, Vec2::new(-1.0, -1.0));
        s.handle_event(InputEvent::PointerMoved { x: 1000.0, y: 500.0 });
        assert_eq!(s.sample().pointer, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn pointer_latest_wins() {
        let mut s = state(1000.0, 500.0, 5.0);
        for x in [0.0, 100.0, 900.0, 500.0] {
            s.handle_event(InputEvent::PointerMoved { x, y: 250.0 });
        }
        assert_eq!(s.sample().pointer.x, 0.0);
    }

    #[test]
    fn scroll_progress_spans_unit_interval() {
        let mut s = state(1000.0, 500.0, 5.0);
        assert_eq!(s.sample().scroll, 0.0);
        // Content is 2500, scrollable span 2000.
        s.handle_event(InputEvent::Scrolled { delta: 1000.0 });
        assert!((s.sample().scroll - 0.5).abs() < 1e-6);
        s.handle_event(InputEvent::Scrolled { delta: 10_000.0 });
        assert_eq!(s.sample().scroll, 1.0);
        s.handle_event(InputEvent::Scrolled { delta: -10_000.0 });
        assert_eq!(s.sample().scroll, 0.0);
    }

    #[test]
    fn zero_height_document_reports_zero() {
        // One page: content height equals viewport height, span is zero.
        let mut s = state(1000.0, 500.0, 1.0);
        s.handle_event(InputEvent::Scrolled { delta: 300.0 });
        assert_eq!(s.sample().scroll, 0.0);

        // Degenerate zero-sized viewport.
        let mut s = state(0.0, 0.0, 5.0);
        s.handle_event(InputEvent::Scrolled { delta: 300.0 });
        assert_eq!(s.sample().scroll, 0.0);
    }

    #[test]
    fn shrinking_document_reclamps_offset() {
        let mut s = state(1000.0, 500.0, 5.0);
        s.handle_event(InputEvent::Scrolled { delta: 2000.0 });
        assert_eq!(s.sample().scroll, 1.0);
        s.set_viewport(1000.0, 500.0, 2.0);
        // Offset clamped to the new 500px span; still within [0, 1].
        assert!(s.sample().scroll <= 1.0);
        assert_eq!(s.sample().scroll, 1.0);
    }

    #[test]
    fn remount_starts_from_zero_sample() {
        let mut s = state(1000.0, 500.0, 5.0);
        s.handle_event(InputEvent::PointerMoved { x: 900.0, y: 400.0 });
        s.handle_event(InputEvent::Scrolled { delta: 700.0 });
        assert_ne!(s.sample(), InputSample::default());
        // A remount constructs fresh trackers; nothing carries over.
        let fresh = state(1000.0, 500.0, 5.0);
        assert_eq!(fresh.sample(), InputSample::default());
    }
}
