use std::{fmt, rc::Rc};

use crate::{
    host::HostNavigation,
    renderer::{NavigationDecision, Renderer},
    session::{clean_registration_data, SessionStore},
    target::RegistrationTarget,
};

/// Called once the signup flow reached its landing host, with the navigation
/// context enclosing the registration screen.
pub type CompletionCallback<C> = Box<dyn FnOnce(Option<C>)>;

/// Classification of a navigation the renderer is about to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Let the renderer proceed, the navigation stays inside the flow.
    Allow,
    /// The account was created.
    Complete,
    /// The user went back to the login page.
    Abandon,
}

impl NavigationAction {
    pub fn decision(&self) -> NavigationDecision {
        match self {
            NavigationAction::Allow => NavigationDecision::Allow,
            NavigationAction::Complete | NavigationAction::Abandon => NavigationDecision::Cancel,
        }
    }
}

/// How the registration flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Completed,
    Abandoned,
    Cancelled,
}

/// Drives one presented registration screen.
pub struct RegistrationController<H: HostNavigation> {
    target: RegistrationTarget,
    host: H,
    session_store: Rc<dyn SessionStore>,
    is_loading: bool,
    on_completed: Option<CompletionCallback<H::Context>>,
    outcome: Option<RegistrationOutcome>,
    dismissed: bool,
}

impl<H: HostNavigation> RegistrationController<H> {
    pub fn new(target: RegistrationTarget, host: H, session_store: Rc<dyn SessionStore>) -> Self {
        Self {
            target,
            host,
            session_store,
            is_loading: true,
            on_completed: None,
            outcome: None,
            dismissed: false,
        }
    }

    pub fn with_completion<F>(mut self, on_completed: F) -> Self
    where
        F: FnOnce(Option<H::Context>) + 'static,
    {
        self.on_completed = Some(Box::new(on_completed));
        self
    }

    pub fn target(&self) -> &RegistrationTarget {
        &self.target
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// True until the renderer reported its initial content, drives the loading overlay.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn outcome(&self) -> Option<RegistrationOutcome> {
        self.outcome
    }

    /// Start the signup flow in the renderer.
    pub fn present<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        tracing::info!(
            "Presenting {} registration: {}",
            self.target.name(),
            self.target.target_url()
        );
        renderer.load(self.target.target_url());
    }

    pub fn initial_load_complete(&mut self) {
        if self.is_loading {
            self.is_loading = false;
            tracing::info!("{} registration page ready", self.target.name());
        }
    }

    /// Classify a navigation by the host of its URL. Landing is checked before login.
    pub fn classify(&self, url: Option<&str>) -> NavigationAction {
        match url.and_then(host_of) {
            None => NavigationAction::Allow,
            Some(host) => self.classify_host(&host),
        }
    }

    fn classify_host(&self, host: &str) -> NavigationAction {
        if host == self.target.landing_host() {
            NavigationAction::Complete
        } else if host == self.target.login_host() {
            NavigationAction::Abandon
        } else {
            NavigationAction::Allow
        }
    }

    /// Renderer hook called before each navigation. The decision is handed to
    /// `decision_handler` before the completion or dismissal runs.
    pub fn decide_policy<R, F>(
        &mut self,
        url: Option<&str>,
        renderer: &mut R,
        decision_handler: F,
    ) where
        R: Renderer + ?Sized,
        F: FnOnce(NavigationDecision),
    {
        let action = self.prepare(url, renderer);
        decision_handler(action.decision());
        self.apply(action);
    }

    /// Same as [`Self::decide_policy`] for renderers expecting a returned decision.
    pub fn navigation_decision<R>(
        &mut self,
        url: Option<&str>,
        renderer: &mut R,
    ) -> NavigationDecision
    where
        R: Renderer + ?Sized,
    {
        let action = self.prepare(url, renderer);
        self.apply(action);
        action.decision()
    }

    fn prepare<R>(&self, url: Option<&str>, renderer: &mut R) -> NavigationAction
    where
        R: Renderer + ?Sized,
    {
        let Some(host) = url.and_then(host_of) else {
            tracing::debug!("No host in navigation to {:?}, allowing it", url);
            return NavigationAction::Allow;
        };

        let safe_area_bottom = renderer.safe_area_bottom_inset();
        renderer.set_content_inset_bottom(-safe_area_bottom);

        let action = self.classify_host(&host);
        tracing::debug!("Navigation to {}: {:?}", host, action);
        action
    }

    fn apply(&mut self, action: NavigationAction) {
        if action == NavigationAction::Allow {
            return;
        }
        if let Some(outcome) = self.outcome {
            tracing::debug!(
                "Registration already {:?}, ignoring {:?} navigation",
                outcome,
                action
            );
            return;
        }

        match action {
            NavigationAction::Complete => {
                self.outcome = Some(RegistrationOutcome::Completed);
                tracing::info!("{} registration completed", self.target.name());
                let context = self.host.enclosing_navigation_context();
                if let Some(on_completed) = self.on_completed.take() {
                    on_completed(context);
                }
            }
            NavigationAction::Abandon => {
                self.outcome = Some(RegistrationOutcome::Abandoned);
                tracing::info!(
                    "{} registration abandoned for the login page",
                    self.target.name()
                );
                self.dismiss();
            }
            NavigationAction::Allow => {}
        }
    }

    /// The user pressed cancel: forget the web session of the flow and leave.
    pub fn cancel(&mut self) {
        tracing::info!("{} registration cancelled by the user", self.target.name());
        clean_registration_data(self.session_store.clone());
        if self.outcome.is_none() {
            self.outcome = Some(RegistrationOutcome::Cancelled);
        }
        self.dismiss();
    }

    fn dismiss(&mut self) {
        if !self.dismissed {
            self.dismissed = true;
            self.host.dismiss();
        }
    }
}

impl<H: HostNavigation> fmt::Debug for RegistrationController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationController")
            .field("target", &self.target)
            .field("is_loading", &self.is_loading)
            .field("has_completion", &self.on_completed.is_some())
            .field("outcome", &self.outcome)
            .field("dismissed", &self.dismissed)
            .finish()
    }
}

fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()?
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}
