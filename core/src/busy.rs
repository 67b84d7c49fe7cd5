//! Busy indicator shown while requests are in flight.
//!
//! # Design
//! The overlay is driven by a count of in-flight calls rather than a single
//! flag, so overlapping calls compose: it stays visible until the last one
//! finishes. Page scrolling is locked exactly while the overlay is visible.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Something that can signal "busy" and "not busy" to the user.
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

impl<T: BusyIndicator + ?Sized> BusyIndicator for &T {
    fn show(&self) {
        (**self).show()
    }

    fn hide(&self) {
        (**self).hide()
    }
}

impl<T: BusyIndicator + ?Sized> BusyIndicator for Arc<T> {
    fn show(&self) {
        (**self).show()
    }

    fn hide(&self) {
        (**self).hide()
    }
}

/// Indicator that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBusyIndicator;

impl BusyIndicator for NoBusyIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

/// Loading overlay state shared between clones.
#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.is_visible()
    }

    /// Force the overlay hidden, e.g. once a page has finished loading after
    /// a form submission.
    pub fn reset(&self) {
        self.in_flight.store(0, Ordering::SeqCst);
    }
}

impl BusyIndicator for LoadingOverlay {
    fn show(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        // saturating: a hide after reset() must not wrap
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

/// Shows the indicator on creation and hides it exactly once on drop.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    indicator: &'a dyn BusyIndicator,
}

impl<'a> BusyGuard<'a> {
    pub fn new(indicator: &'a dyn BusyIndicator) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

impl std::fmt::Debug for BusyGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_hidden_initially() {
        let overlay = LoadingOverlay::new();
        assert!(!overlay.is_visible());
        assert!(!overlay.is_scroll_locked());
    }

    #[test]
    fn overlapping_calls_keep_overlay_visible() {
        let overlay = LoadingOverlay::new();
        let first = BusyGuard::new(&overlay);
        let second = BusyGuard::new(&overlay);
        drop(first);
        assert!(overlay.is_visible(), "second call still in flight");
        drop(second);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn clones_share_state() {
        let overlay = LoadingOverlay::new();
        let handle = overlay.clone();
        handle.show();
        assert_eq!(overlay.in_flight(), 1);
        assert!(overlay.is_scroll_locked());
    }

    #[test]
    fn hide_saturates_after_reset() {
        let overlay = LoadingOverlay::new();
        overlay.show();
        overlay.reset();
        overlay.hide();
        assert_eq!(overlay.in_flight(), 0);
    }

    #[test]
    fn guard_hides_on_unwind() {
        let overlay = LoadingOverlay::new();
        let result = std::panic::catch_unwind(|| {
            let _guard = BusyGuard::new(&overlay);
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(!overlay.is_visible());
    }
}
