/// The host application's screen presentation.
pub trait HostNavigation {
    /// Navigation context handed to the completion callback, so the host can
    /// push its own screens once the account exists.
    type Context;

    /// Dismiss the registration screen.
    fn dismiss(&mut self);

    /// Nearest navigation context enclosing the registration screen, if any.
    fn enclosing_navigation_context(&self) -> Option<Self::Context>;
}
