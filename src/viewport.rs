//! Viewport classification.
//!
//! The population of the animated scene is scaled to the viewport:
//! compact viewports get a reduced object set and a cheaper particle
//! budget. Classification is a pure function of logical width — no
//! hysteresis, no debouncing — so resize storms are last-write-wins.

/// Width below which a viewport is classified compact, in logical pixels.
pub const COMPACT_BREAKPOINT: f32 = 768.0;

/// Scene population tier for the current viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewportClass {
    /// Narrow viewport: reduced object set, lower particle count.
    Compact,
    /// Everything else: the entire motif set.
    #[default]
    Full,
}

/// Classify a viewport by its logical width.
#[must_use]
pub fn classify(width: f32) -> ViewportClass {
    if width < COMPACT_BREAKPOINT {
        ViewportClass::Compact
    } else {
        ViewportClass::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(classify(767.0), ViewportClass::Compact);
        assert_eq!(classify(767.999), ViewportClass::Compact);
        assert_eq!(classify(768.0), ViewportClass::Full);
        assert_eq!(classify(768.001), ViewportClass::Full);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(0.0), ViewportClass::Compact);
        assert_eq!(classify(400.0), ViewportClass::Compact);
        assert_eq!(classify(1200.0), ViewportClass::Full);
        assert_eq!(classify(f32::MAX), ViewportClass::Full);
    }

    #[test]
    fn classification_is_pure() {
        // Same width always yields the same class, regardless of call order.
        let widths = [400.0, 1200.0, 400.0, 768.0, 400.0];
        let first: Vec<_> = widths.iter().map(|&w| classify(w)).collect();
        let second: Vec<_> = widths.iter().map(|&w| classify(w)).collect();
        assert_eq!(first, second);
    }
}
