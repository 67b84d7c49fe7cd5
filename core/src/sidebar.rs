//! Mobile sidebar open/close state.
//!
//! While the sidebar is open a full-page backdrop sits behind it; clicking
//! the backdrop closes the sidebar and removes the backdrop.

/// Id the host gives the backdrop element.
pub const BACKDROP_ID: &str = "sidebar-overlay";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Backdrop present iff the sidebar is open.
    pub fn has_backdrop(&self) -> bool {
        self.open
    }

    /// Navbar toggler click. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::trace!(open = self.open, "sidebar toggled");
        self.open
    }

    /// Click on the backdrop. No-op when already closed.
    pub fn click_backdrop(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_with_backdrop() {
        let mut sidebar = Sidebar::new();
        assert!(sidebar.toggle());
        assert!(sidebar.has_backdrop());
    }

    #[test]
    fn second_toggle_removes_backdrop() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle();
        assert!(!sidebar.toggle());
        assert!(!sidebar.has_backdrop());
    }

    #[test]
    fn backdrop_click_dismisses() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle();
        sidebar.click_backdrop();
        assert!(!sidebar.is_open());
        assert!(!sidebar.has_backdrop());
        sidebar.click_backdrop();
        assert!(!sidebar.is_open());
    }
}
