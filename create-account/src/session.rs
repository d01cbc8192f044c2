use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

/// Kinds of persisted web state a session store keeps per origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WebsiteDataType {
    Cookies,
    DiskCache,
    MemoryCache,
    FetchCache,
    LocalStorage,
    SessionStorage,
    IndexedDb,
    ServiceWorkerRegistrations,
}

impl WebsiteDataType {
    pub const ALL: [WebsiteDataType; 8] = [
        WebsiteDataType::Cookies,
        WebsiteDataType::DiskCache,
        WebsiteDataType::MemoryCache,
        WebsiteDataType::FetchCache,
        WebsiteDataType::LocalStorage,
        WebsiteDataType::SessionStorage,
        WebsiteDataType::IndexedDb,
        WebsiteDataType::ServiceWorkerRegistrations,
    ];

    pub fn all() -> BTreeSet<WebsiteDataType> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for WebsiteDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WebsiteDataType::Cookies => "cookies",
            WebsiteDataType::DiskCache => "disk-cache",
            WebsiteDataType::MemoryCache => "memory-cache",
            WebsiteDataType::FetchCache => "fetch-cache",
            WebsiteDataType::LocalStorage => "local-storage",
            WebsiteDataType::SessionStorage => "session-storage",
            WebsiteDataType::IndexedDb => "indexeddb",
            WebsiteDataType::ServiceWorkerRegistrations => "service-workers",
        };
        write!(f, "{}", name)
    }
}

/// Web state persisted for one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Origin (usually the registrable domain) the data belongs to.
    pub scope: String,
    pub data_types: BTreeSet<WebsiteDataType>,
}

pub type FetchCompletion = Box<dyn FnOnce(Vec<SessionRecord>)>;
pub type RemoveCompletion = Box<dyn FnOnce()>;

/// Persisted web session storage of the renderer.
///
/// Both operations complete asynchronously through their completion; a store
/// may also call it before returning.
pub trait SessionStore {
    /// List the records holding at least one of `types`.
    fn fetch_records(&self, types: &BTreeSet<WebsiteDataType>, completion: FetchCompletion);

    /// Delete `types` for the given records only.
    fn remove_data(
        &self,
        types: &BTreeSet<WebsiteDataType>,
        records: &[SessionRecord],
        completion: RemoveCompletion,
    );
}

/// Delete every persisted record of the store, one record at a time.
///
/// Fire-and-forget: deletions are issued as soon as the records are listed,
/// nothing waits for them and their completion carries no result.
pub fn clean_registration_data<S>(store: Rc<S>)
where
    S: SessionStore + ?Sized + 'static,
{
    let all_types = WebsiteDataType::all();
    let remover = store.clone();
    store.fetch_records(
        &all_types,
        Box::new(move |records| {
            tracing::debug!("Removing {} web session records", records.len());
            for record in records {
                let scope = record.scope.clone();
                remover.remove_data(
                    &record.data_types,
                    std::slice::from_ref(&record),
                    Box::new(move || tracing::trace!("Removed web session data of {}", scope)),
                );
            }
        }),
    );
}

/// Session store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RefCell<BTreeMap<String, BTreeSet<WebsiteDataType>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, scope: impl Into<String>, data_type: WebsiteDataType) {
        self.records
            .borrow_mut()
            .entry(scope.into())
            .or_default()
            .insert(data_type);
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records
            .borrow()
            .iter()
            .map(|(scope, data_types)| SessionRecord {
                scope: scope.clone(),
                data_types: data_types.clone(),
            })
            .collect()
    }
}

impl SessionStore for InMemorySessionStore {
    fn fetch_records(&self, types: &BTreeSet<WebsiteDataType>, completion: FetchCompletion) {
        // The borrow must end before the completion runs, it may remove data.
        let records: Vec<SessionRecord> = self
            .records
            .borrow()
            .iter()
            .filter_map(|(scope, data_types)| {
                let data_types: BTreeSet<_> = data_types.intersection(types).copied().collect();
                (!data_types.is_empty()).then(|| SessionRecord {
                    scope: scope.clone(),
                    data_types,
                })
            })
            .collect();
        completion(records);
    }

    fn remove_data(
        &self,
        types: &BTreeSet<WebsiteDataType>,
        records: &[SessionRecord],
        completion: RemoveCompletion,
    ) {
        {
            let mut stored = self.records.borrow_mut();
            for record in records {
                if let Some(data_types) = stored.get_mut(&record.scope) {
                    data_types.retain(|t| !types.contains(t));
                    if data_types.is_empty() {
                        stored.remove(&record.scope);
                    }
                }
            }
        }
        completion();
    }
}
