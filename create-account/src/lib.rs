//! Embeddable registration screen driving an external web signup flow.
//!
//! The [`RegistrationController`] loads a [`RegistrationTarget`] in the
//! host's web renderer, watches every navigation of the embedded content and
//! hands control back to the host once the flow lands on its completion host.

pub mod args;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod host;
pub mod logger;
pub mod renderer;
pub mod session;
pub mod target;

#[cfg(test)]
mod testutils;

pub use controller::{NavigationAction, RegistrationController, RegistrationOutcome};
pub use environment::ApiEnvironment;
pub use error::Error;
pub use host::HostNavigation;
pub use renderer::{NavigationDecision, Renderer};
pub use session::{InMemorySessionStore, SessionRecord, SessionStore, WebsiteDataType};
pub use target::{Product, RegistrationTarget};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
