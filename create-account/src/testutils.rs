use crate::{
    host::HostNavigation,
    renderer::Renderer,
    session::{FetchCompletion, RemoveCompletion, SessionRecord, SessionStore, WebsiteDataType},
};

use std::{cell::RefCell, collections::BTreeSet, sync::Mutex};

#[derive(Debug, Default)]
pub struct DummyRenderer {
    pub loaded: Vec<String>,
    pub safe_area_bottom: f64,
    pub content_inset_bottom: Option<f64>,
}

impl Renderer for DummyRenderer {
    fn load(&mut self, url: &str) {
        self.loaded.push(url.to_string());
    }

    fn safe_area_bottom_inset(&self) -> f64 {
        self.safe_area_bottom
    }

    fn set_content_inset_bottom(&mut self, inset: f64) {
        self.content_inset_bottom = Some(inset);
    }
}

#[derive(Debug, Default)]
pub struct DummyHost {
    pub context: Option<&'static str>,
    pub dismiss_count: usize,
}

impl DummyHost {
    pub fn with_context(context: &'static str) -> Self {
        Self {
            context: Some(context),
            dismiss_count: 0,
        }
    }
}

impl HostNavigation for DummyHost {
    type Context = &'static str;

    fn dismiss(&mut self) {
        self.dismiss_count += 1;
    }

    fn enclosing_navigation_context(&self) -> Option<&'static str> {
        self.context
    }
}

/// Session store holding back every removal completion until told otherwise.
pub struct DeferredSessionStore {
    scopes: Vec<String>,
    removals: RefCell<Vec<Vec<String>>>,
    completions: RefCell<Vec<RemoveCompletion>>,
}

impl DeferredSessionStore {
    pub fn new(scopes: Vec<&str>) -> Self {
        Self {
            scopes: scopes.into_iter().map(String::from).collect(),
            removals: RefCell::new(Vec::new()),
            completions: RefCell::new(Vec::new()),
        }
    }

    /// Scopes of every `remove_data` call, one entry per call.
    pub fn removals(&self) -> Vec<Vec<String>> {
        self.removals.borrow().clone()
    }

    pub fn pending_completions(&self) -> usize {
        self.completions.borrow().len()
    }

    pub fn complete_in_reverse(&self) {
        let completions: Vec<_> = self.completions.borrow_mut().drain(..).collect();
        for completion in completions.into_iter().rev() {
            completion();
        }
    }
}

impl SessionStore for DeferredSessionStore {
    fn fetch_records(&self, types: &BTreeSet<WebsiteDataType>, completion: FetchCompletion) {
        let records = self
            .scopes
            .iter()
            .map(|scope| SessionRecord {
                scope: scope.clone(),
                data_types: types.clone(),
            })
            .collect();
        completion(records);
    }

    fn remove_data(
        &self,
        _types: &BTreeSet<WebsiteDataType>,
        records: &[SessionRecord],
        completion: RemoveCompletion,
    ) {
        self.removals
            .borrow_mut()
            .push(records.iter().map(|r| r.scope.clone()).collect());
        self.completions.borrow_mut().push(completion);
    }
}

/// Serializes the tests touching the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (or removed for `None`), restoring
/// their previous values afterwards.
pub fn with_env_vars<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let previous: Vec<_> = vars
        .iter()
        .map(|(name, _)| (name.to_string(), std::env::var(name).ok()))
        .collect();
    for (name, value) in vars {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (name, value) in previous {
        match value {
            Some(value) => std::env::set_var(&name, value),
            None => std::env::remove_var(&name),
        }
    }
    if let Err(e) = res {
        std::panic::resume_unwind(e);
    }
}
