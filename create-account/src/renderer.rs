/// Answer to a navigation the renderer is about to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Cancel,
}

/// The embedded web content renderer, as seen from the registration screen.
///
/// The renderer delivers two events to the controller: the initial content
/// being ready, and every navigation it is about to commit. Both are called
/// on the UI thread.
pub trait Renderer {
    fn load(&mut self, url: &str);
    /// Bottom safe-area inset of the renderer view, in points.
    fn safe_area_bottom_inset(&self) -> f64;
    fn set_content_inset_bottom(&mut self, inset: f64);
}
