//! Search session
//!
//! One `SearchSession` exists per visit to the search view. It owns the
//! filters, the current page, the loaded dogs and the favorites, and is dropped
//! when the user leaves the view.
//!
//! Operations take `&self` and may overlap. Every search takes a sequence
//! number when it is dispatched; a completion is applied only if no newer
//! search has been dispatched since, so the latest request always wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use pawmatch_client::{ClientError, Cursor, Dog, DogApi, SearchQuery, SearchResponse, SortOrder};
use tracing::{debug, info, warn};

use crate::favorites::Favorites;
use crate::filters::SearchFilters;
use crate::notification::Notification;

/// Result of a search or page navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were applied to the session
    Loaded { total: u64, shown: usize },
    /// A newer search was dispatched while this one was in flight
    Stale,
    /// The service rejected the session cookie
    SessionExpired,
    /// The requested page link does not exist
    NoPage,
    Failed(Notification),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// Result of a match request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(Dog),
    /// Rejected locally, no request was made
    NoFavorites(Notification),
    /// The service picked an id that could not be resolved to a record
    Unresolved(String),
    Failed(Notification),
}

/// Point-in-time copy of the session, used for rendering
#[derive(Clone, Debug, Default)]
pub struct SessionSnapshot {
    pub filters: SearchFilters,
    pub breeds: Vec<String>,
    pub dogs: Vec<Dog>,
    pub total: Option<u64>,
    pub page: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub favorites: Favorites,
    pub matched: Option<Dog>,
    pub match_modal_open: bool,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    filters: SearchFilters,
    breeds: Vec<String>,
    response: Option<SearchResponse>,
    dogs: Vec<Dog>,
    page: u32,
    favorites: Favorites,
    matched: Option<Dog>,
    match_modal_open: bool,
    loading_seq: Option<u64>,
}

impl SessionState {
    /// Cursors belong to the filters that produced them.
    fn invalidate_pagination(&mut self) {
        if let Some(response) = self.response.as_mut() {
            response.next = None;
            response.prev = None;
        }
        self.page = 0;
    }
}

/// What a dispatched search brought back
enum Fetched {
    Page {
        response: SearchResponse,
        dogs: Vec<Dog>,
    },
    Stale,
    Failed(ClientError),
}

pub struct SearchSession {
    api: Arc<dyn DogApi>,
    state: Mutex<SessionState>,
    latest_search: AtomicU64,
}

impl SearchSession {
    pub fn new(api: Arc<dyn DogApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::default()),
            latest_search: AtomicU64::new(0),
        }
    }

    /// Load the breed list and run the initial unfiltered search concurrently.
    ///
    /// Returns the breed-list notification, if any, and the search outcome.
    pub async fn activate(&self) -> (Option<Notification>, SearchOutcome) {
        tokio::join!(self.refresh_breeds(), self.search())
    }

    /// Fetch the breed list. Returns a notification on failure.
    pub async fn refresh_breeds(&self) -> Option<Notification> {
        match self.api.breeds().await {
            Ok(breeds) => {
                debug!("Loaded {} breeds", breeds.len());
                self.state.lock().breeds = breeds;
                None
            }
            Err(e) => {
                warn!("Failed to fetch breeds: {}", e);
                Some(Notification::breeds_failed())
            }
        }
    }

    // ============== Filters ==============

    /// Apply an arbitrary filter edit; pagination restarts at the first page.
    ///
    /// Searches still in flight were built from the old filters and end up stale.
    pub fn update_filters<F: FnOnce(&mut SearchFilters)>(&self, edit: F) {
        let mut state = self.state.lock();
        edit(&mut state.filters);
        state.invalidate_pagination();
        self.latest_search.fetch_add(1, Ordering::SeqCst);
        state.loading_seq = None;
    }

    pub fn set_breed(&self, breed: &str, selected: bool) {
        self.update_filters(|filters| {
            filters.set_breed(breed, selected);
        });
    }

    pub fn set_age_min(&self, age_min: Option<u32>) {
        self.update_filters(|filters| filters.age_min = age_min);
    }

    pub fn set_age_max(&self, age_max: Option<u32>) {
        self.update_filters(|filters| filters.age_max = age_max);
    }

    pub fn set_zip_code(&self, zip_code: Option<&str>) {
        self.update_filters(|filters| filters.set_zip_code(zip_code));
    }

    pub fn set_sort(&self, sort: SortOrder) {
        self.update_filters(|filters| filters.sort = sort);
    }

    // ============== Search ==============

    /// Search with the current filters, starting at the first page
    pub async fn search(&self) -> SearchOutcome {
        self.run_search(None, 0).await
    }

    /// Follow the stored `next` or `prev` link
    pub async fn turn_page(&self, direction: PageDirection) -> SearchOutcome {
        let (link, page) = {
            let state = self.state.lock();
            let response = state.response.as_ref();
            match direction {
                PageDirection::Next => (
                    response.and_then(|r| r.next.clone()),
                    state.page.saturating_add(1),
                ),
                PageDirection::Prev => (
                    response.and_then(|r| r.prev.clone()),
                    state.page.saturating_sub(1),
                ),
            }
        };

        let Some(link) = link else {
            return SearchOutcome::NoPage;
        };

        let cursor = match Cursor::from_link(self.api.base_url(), &link) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!("Ignoring malformed page link {}: {}", link, e);
                return SearchOutcome::NoPage;
            }
        };

        match (direction, cursor) {
            // A `next` link without a token cannot advance.
            (PageDirection::Next, None) => SearchOutcome::NoPage,
            (_, cursor) => self.run_search(cursor, page).await,
        }
    }

    pub async fn next_page(&self) -> SearchOutcome {
        self.turn_page(PageDirection::Next).await
    }

    pub async fn prev_page(&self) -> SearchOutcome {
        self.turn_page(PageDirection::Prev).await
    }

    async fn run_search(&self, cursor: Option<Cursor>, page: u32) -> SearchOutcome {
        let (seq, query) = {
            let mut state = self.state.lock();
            let seq = self.latest_search.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading_seq = Some(seq);
            (seq, state.filters.to_query(cursor))
        };
        debug!("Dispatching search #{}: {:?}", seq, query);

        let fetched = self.fetch_page(seq, &query).await;

        let mut state = self.state.lock();
        if !self.is_latest(seq) {
            debug!("Discarding stale search #{}", seq);
            return SearchOutcome::Stale;
        }
        state.loading_seq = None;

        match fetched {
            Fetched::Page { response, dogs } => {
                let total = response.total;
                let shown = dogs.len();
                state.response = Some(response);
                state.dogs = dogs;
                state.page = page;
                SearchOutcome::Loaded { total, shown }
            }
            Fetched::Stale => SearchOutcome::Stale,
            Fetched::Failed(e) if e.is_unauthorized() => {
                info!("Search rejected, session expired");
                SearchOutcome::SessionExpired
            }
            Fetched::Failed(e) => {
                warn!("Search failed: {}", e);
                SearchOutcome::Failed(Notification::search_failed())
            }
        }
    }

    /// Search, then resolve the page's ids with a single bulk detail call.
    async fn fetch_page(&self, seq: u64, query: &SearchQuery) -> Fetched {
        let response = match self.api.search(query).await {
            Ok(response) => response,
            Err(e) => return Fetched::Failed(e),
        };

        if response.result_ids.is_empty() {
            return Fetched::Page {
                response,
                dogs: Vec::new(),
            };
        }

        if !self.is_latest(seq) {
            return Fetched::Stale;
        }

        let dogs = match self.api.dogs(&response.result_ids).await {
            Ok(dogs) => order_by_ids(&response.result_ids, dogs),
            Err(e) => {
                warn!(
                    "Detail fetch for {} dogs failed: {}",
                    response.result_ids.len(),
                    e
                );
                Vec::new()
            }
        };

        Fetched::Page { response, dogs }
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest_search.load(Ordering::SeqCst) == seq
    }

    // ============== Favorites & Match ==============

    /// Returns whether the dog is now a favorite
    pub fn toggle_favorite(&self, dog_id: &str) -> bool {
        self.state.lock().favorites.toggle(dog_id)
    }

    pub fn favorites(&self) -> Favorites {
        self.state.lock().favorites.clone()
    }

    /// Ask the service to pick one of the favorites and open the match modal.
    pub async fn request_match(&self) -> MatchOutcome {
        let ids = self.state.lock().favorites.to_vec();
        if ids.is_empty() {
            return MatchOutcome::NoFavorites(Notification::no_favorites());
        }

        let matched_id = match self.api.match_dogs(&ids).await {
            Ok(result) => result.matched_id,
            Err(e) => {
                warn!("Match request failed: {}", e);
                return MatchOutcome::Failed(Notification::match_failed());
            }
        };

        let loaded = self
            .state
            .lock()
            .dogs
            .iter()
            .find(|dog| dog.id == matched_id)
            .cloned();

        let dog = match loaded {
            Some(dog) => Some(dog),
            None => self.fetch_dog(&matched_id).await,
        };

        match dog {
            Some(dog) => {
                info!("Matched with {} ({})", dog.name, dog.id);
                let mut state = self.state.lock();
                state.matched = Some(dog.clone());
                state.match_modal_open = true;
                MatchOutcome::Matched(dog)
            }
            None => {
                warn!("Match {} could not be resolved", matched_id);
                MatchOutcome::Unresolved(matched_id)
            }
        }
    }

    /// Resolve a single id outside the loaded page
    async fn fetch_dog(&self, dog_id: &str) -> Option<Dog> {
        debug!("Fetching dog {} outside the current page", dog_id);
        match self.api.dogs(&[dog_id.to_string()]).await {
            Ok(dogs) => dogs.into_iter().find(|dog| dog.id == dog_id),
            Err(e) => {
                warn!("Failed to fetch dog {}: {}", dog_id, e);
                None
            }
        }
    }

    /// Hide the match modal. The matched dog stays stored.
    pub fn close_match_modal(&self) {
        self.state.lock().match_modal_open = false;
    }

    /// Show the last match again. Returns false when nothing was matched yet.
    pub fn reopen_match_modal(&self) -> bool {
        let mut state = self.state.lock();
        state.match_modal_open = state.matched.is_some();
        state.match_modal_open
    }

    // ============== Accessors ==============

    pub fn dogs(&self) -> Vec<Dog> {
        self.state.lock().dogs.clone()
    }

    pub fn filters(&self) -> SearchFilters {
        self.state.lock().filters.clone()
    }

    pub fn matched_dog(&self) -> Option<Dog> {
        self.state.lock().matched.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        let response = state.response.as_ref();
        SessionSnapshot {
            filters: state.filters.clone(),
            breeds: state.breeds.clone(),
            dogs: state.dogs.clone(),
            total: response.map(|r| r.total),
            page: state.page,
            has_next: response.is_some_and(|r| r.next.is_some()),
            has_prev: response.is_some_and(|r| r.prev.is_some()),
            favorites: state.favorites.clone(),
            matched: state.matched.clone(),
            match_modal_open: state.match_modal_open,
            loading: state.loading_seq.is_some(),
        }
    }
}

/// Arrange detail records in the order the search returned their ids.
///
/// Ids the detail call did not return are skipped; records nobody asked for
/// are dropped.
fn order_by_ids(ids: &[String], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut by_id: HashMap<String, Dog> = dogs.into_iter().map(|d| (d.id.clone(), d)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use pawmatch_client::MatchResult;
    use tokio::sync::Notify;
    use url::Url;

    type SearchFn =
        Box<dyn Fn(&SearchQuery) -> pawmatch_client::Result<SearchResponse> + Send + Sync>;

    fn dog(id: &str, breed: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: format!("https://img/{id}.jpg"),
            name: format!("Dog {id}"),
            age: 2,
            zip_code: "10001".to_string(),
            breed: breed.to_string(),
        }
    }

    fn page(ids: &[&str], next: Option<&str>, prev: Option<&str>) -> SearchResponse {
        SearchResponse {
            result_ids: ids.iter().map(|s| s.to_string()).collect(),
            total: ids.len() as u64,
            next: next.map(str::to_string),
            prev: prev.map(str::to_string),
        }
    }

    struct MockApi {
        base: Url,
        catalog: HashMap<String, Dog>,
        search_fn: SearchFn,
        match_id: Option<String>,
        searches: Mutex<Vec<SearchQuery>>,
        detail_calls: Mutex<Vec<Vec<String>>>,
        match_calls: Mutex<Vec<Vec<String>>>,
        // Searches matching `gate_when` wait for `gate` after signalling `entered`.
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
        gate_when: fn(&SearchQuery) -> bool,
    }

    impl MockApi {
        fn new(search_fn: SearchFn) -> Self {
            let catalog = ["d1", "d2", "d3", "d4"]
                .iter()
                .map(|id| (id.to_string(), dog(id, "Beagle")))
                .collect();
            Self {
                base: Url::parse("https://dogs.test").unwrap(),
                catalog,
                search_fn,
                match_id: None,
                searches: Mutex::new(Vec::new()),
                detail_calls: Mutex::new(Vec::new()),
                match_calls: Mutex::new(Vec::new()),
                gate: None,
                gate_when: |query| query.sort == SortOrder::Asc,
            }
        }
    }

    #[async_trait]
    impl DogApi for MockApi {
        async fn login(&self, _name: &str, _email: &str) -> pawmatch_client::Result<()> {
            Ok(())
        }

        async fn logout(&self) -> pawmatch_client::Result<()> {
            Ok(())
        }

        async fn breeds(&self) -> pawmatch_client::Result<Vec<String>> {
            Ok(vec!["Beagle".to_string(), "Pug".to_string()])
        }

        async fn search(&self, query: &SearchQuery) -> pawmatch_client::Result<SearchResponse> {
            self.searches.lock().push(query.clone());
            if let Some((entered, gate)) = &self.gate
                && (self.gate_when)(query)
            {
                entered.notify_one();
                gate.notified().await;
            }
            (self.search_fn)(query)
        }

        async fn dogs(&self, ids: &[String]) -> pawmatch_client::Result<Vec<Dog>> {
            self.detail_calls.lock().push(ids.to_vec());
            // Reverse to make sure the session does not rely on service order.
            Ok(ids
                .iter()
                .rev()
                .filter_map(|id| self.catalog.get(id).cloned())
                .collect())
        }

        async fn match_dogs(&self, ids: &[String]) -> pawmatch_client::Result<MatchResult> {
            self.match_calls.lock().push(ids.to_vec());
            match &self.match_id {
                Some(id) => Ok(MatchResult {
                    matched_id: id.clone(),
                }),
                None => Err(ClientError::RequestFailed {
                    status: 500,
                    body: String::new(),
                }),
            }
        }

        fn base_url(&self) -> &Url {
            &self.base
        }
    }

    fn session_with(api: MockApi) -> (Arc<MockApi>, SearchSession) {
        let api = Arc::new(api);
        let session = SearchSession::new(api.clone());
        (api, session)
    }

    #[test]
    fn test_order_by_ids() {
        let dogs = vec![dog("d3", "Pug"), dog("d1", "Beagle"), dog("d9", "Akita")];
        let ids = vec!["d1".to_string(), "d2".to_string(), "d3".to_string()];
        let ordered: Vec<String> = order_by_ids(&ids, dogs).into_iter().map(|d| d.id).collect();
        assert_eq!(ordered, vec!["d1", "d3"]);
    }

    #[tokio::test]
    async fn test_activate_loads_breeds_and_first_page() {
        let (api, session) = session_with(MockApi::new(Box::new(|_: &SearchQuery| {
            Ok(page(&["d1", "d2"], None, None))
        })));

        let (breeds_note, outcome) = session.activate().await;
        assert!(breeds_note.is_none());
        assert_eq!(outcome, SearchOutcome::Loaded { total: 2, shown: 2 });

        let snapshot = session.snapshot();
        assert_eq!(snapshot.breeds, vec!["Beagle", "Pug"]);
        assert!(!snapshot.has_next);
        assert!(!snapshot.loading);

        let searches = api.searches.lock();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].sort.sort_param(), "breed:asc");
        assert_eq!(searches[0].size, 25);
        assert!(searches[0].from.is_none());
    }

    #[tokio::test]
    async fn test_detail_call_matches_search_ids() {
        let (api, session) = session_with(MockApi::new(Box::new(|_: &SearchQuery| {
            Ok(page(&["d1", "d2", "d3"], None, None))
        })));

        session.search().await;

        let calls = api.detail_calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["d1", "d2", "d3"]);
        let ids: Vec<String> = session.dogs().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[tokio::test]
    async fn test_empty_results_skip_detail_call() {
        let (api, session) = session_with(MockApi::new(Box::new(|query: &SearchQuery| {
            if query.breeds.is_empty() {
                Ok(page(&["d1"], None, None))
            } else {
                Ok(page(&[], None, None))
            }
        })));

        session.search().await;
        assert_eq!(session.dogs().len(), 1);

        session.set_breed("Akita", true);
        let outcome = session.search().await;
        assert_eq!(outcome, SearchOutcome::Loaded { total: 0, shown: 0 });
        assert!(session.dogs().is_empty());
        assert_eq!(api.detail_calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_change_resets_cursor() {
        let (api, session) = session_with(MockApi::new(Box::new(|query: &SearchQuery| {
            match query.from.as_ref().map(|c| c.as_str().to_string()) {
                None => Ok(page(&["d1"], Some("/dogs/search?size=25&from=25"), None)),
                Some(_) => Ok(page(
                    &["d2"],
                    Some("/dogs/search?size=25&from=50"),
                    Some("/dogs/search?size=25&from=0"),
                )),
            }
        })));

        session.search().await;
        session.next_page().await;
        assert_eq!(session.snapshot().page, 1);

        session.set_age_min(Some(3));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.page, 0);
        assert!(!snapshot.has_next);
        assert!(!snapshot.has_prev);
        assert_eq!(session.next_page().await, SearchOutcome::NoPage);

        session.search().await;
        let searches = api.searches.lock();
        let last = searches.last().unwrap();
        assert!(last.from.is_none());
        assert_eq!(last.age_min, Some(3));
    }

    #[tokio::test]
    async fn test_next_and_prev_follow_links() {
        let (api, session) = session_with(MockApi::new(Box::new(|query: &SearchQuery| {
            match query.from.as_ref().map(|c| c.as_str().to_string()).as_deref() {
                None => Ok(page(&["d1"], Some("/dogs/search?size=25&from=25"), None)),
                Some("25") => Ok(page(
                    &["d2"],
                    None,
                    Some("/dogs/search?size=25&from=0"),
                )),
                Some(_) => Ok(page(&["d1"], Some("/dogs/search?size=25&from=25"), None)),
            }
        })));

        session.search().await;
        assert_eq!(session.prev_page().await, SearchOutcome::NoPage);

        session.next_page().await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.page, 1);
        assert!(!snapshot.has_next);
        assert!(snapshot.has_prev);
        assert_eq!(session.next_page().await, SearchOutcome::NoPage);

        session.prev_page().await;
        assert_eq!(session.snapshot().page, 0);

        let froms: Vec<Option<String>> = api
            .searches
            .lock()
            .iter()
            .map(|q| q.from.as_ref().map(|c| c.as_str().to_string()))
            .collect();
        assert_eq!(
            froms,
            vec![None, Some("25".to_string()), Some("0".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_search_expires_session() {
        let (_api, session) =
            session_with(MockApi::new(Box::new(|_: &SearchQuery| Err(ClientError::Unauthorized))));
        assert_eq!(session.search().await, SearchOutcome::SessionExpired);
    }

    #[tokio::test]
    async fn test_failed_search_keeps_prior_results() {
        let (_api, session) = session_with(MockApi::new(Box::new(|query: &SearchQuery| {
            if query.sort == SortOrder::Asc {
                Ok(page(&["d1", "d2"], None, None))
            } else {
                Err(ClientError::RequestFailed {
                    status: 503,
                    body: String::new(),
                })
            }
        })));

        session.search().await;
        session.set_sort(SortOrder::Desc);
        let outcome = session.search().await;
        assert_eq!(outcome, SearchOutcome::Failed(Notification::search_failed()));
        assert_eq!(session.dogs().len(), 2);
        assert_eq!(session.snapshot().total, Some(2));
    }

    #[tokio::test]
    async fn test_stale_search_is_discarded() {
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let mut api = MockApi::new(Box::new(|query: &SearchQuery| {
            if query.sort == SortOrder::Asc {
                Ok(page(&["d1", "d2"], None, None))
            } else {
                Ok(page(&["d3"], None, None))
            }
        }));
        api.gate = Some((entered.clone(), gate.clone()));
        let (api, session) = session_with(api);

        let (first, second) = tokio::join!(session.search(), async {
            entered.notified().await;
            session.set_sort(SortOrder::Desc);
            let outcome = session.search().await;
            gate.notify_one();
            outcome
        });

        assert_eq!(first, SearchOutcome::Stale);
        assert_eq!(second, SearchOutcome::Loaded { total: 1, shown: 1 });
        let ids: Vec<String> = session.dogs().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["d3"]);
        // The stale search never reached the detail step.
        assert_eq!(api.detail_calls.lock().as_slice(), &[vec!["d3".to_string()]]);
        assert!(!session.snapshot().loading);
    }

    #[tokio::test]
    async fn test_filter_edit_during_page_turn_discards_old_cursors() {
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let mut api = MockApi::new(Box::new(|query: &SearchQuery| {
            match query.from.as_ref().map(|c| c.as_str().to_string()) {
                None => Ok(page(&["d1"], Some("/dogs/search?size=25&from=25"), None)),
                Some(_) => Ok(page(
                    &["d2"],
                    Some("/dogs/search?size=25&from=50"),
                    Some("/dogs/search?size=25&from=0"),
                )),
            }
        }));
        api.gate = Some((entered.clone(), gate.clone()));
        api.gate_when = |query| query.from.is_some();
        let (api, session) = session_with(api);

        session.search().await;

        let (turned, _) = tokio::join!(session.next_page(), async {
            entered.notified().await;
            session.set_age_min(Some(5));
            assert!(!session.snapshot().loading);
            gate.notify_one();
        });

        assert_eq!(turned, SearchOutcome::Stale);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.filters.age_min, Some(5));
        assert_eq!(snapshot.page, 0);
        assert!(!snapshot.has_next);
        assert!(!snapshot.has_prev);
        assert!(!snapshot.loading);
        let ids: Vec<String> = snapshot.dogs.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["d1"]);

        // Nothing left to follow until the new filters are searched.
        assert_eq!(session.next_page().await, SearchOutcome::NoPage);
        session.search().await;
        let searches = api.searches.lock();
        let last = searches.last().unwrap();
        assert!(last.from.is_none());
        assert_eq!(last.age_min, Some(5));
        // The abandoned page turn never resolved its ids.
        assert_eq!(api.detail_calls.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_match_requires_favorites() {
        let mut api = MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&[], None, None))));
        api.match_id = Some("d1".to_string());
        let (api, session) = session_with(api);

        let outcome = session.request_match().await;
        assert_eq!(
            outcome,
            MatchOutcome::NoFavorites(Notification::no_favorites())
        );
        assert!(api.match_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_match_resolves_loaded_dog() {
        let mut api = MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&["d1", "d2"], None, None))));
        api.match_id = Some("d1".to_string());
        let (api, session) = session_with(api);

        session.search().await;
        session.toggle_favorite("d1");
        session.toggle_favorite("d2");

        let outcome = session.request_match().await;
        assert_eq!(outcome, MatchOutcome::Matched(dog("d1", "Beagle")));
        assert_eq!(api.match_calls.lock()[0], vec!["d1", "d2"]);
        // Resolved from the loaded page, no extra detail call.
        assert_eq!(api.detail_calls.lock().len(), 1);

        let snapshot = session.snapshot();
        assert!(snapshot.match_modal_open);
        assert_eq!(snapshot.matched.map(|d| d.id), Some("d1".to_string()));
    }

    #[tokio::test]
    async fn test_match_outside_page_is_fetched() {
        let mut api = MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&["d1"], None, None))));
        api.match_id = Some("d4".to_string());
        let (api, session) = session_with(api);

        session.search().await;
        session.toggle_favorite("d4");

        let outcome = session.request_match().await;
        assert_eq!(outcome, MatchOutcome::Matched(dog("d4", "Beagle")));
        assert_eq!(api.detail_calls.lock().last().unwrap(), &vec!["d4".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_match_is_unresolved() {
        let mut api = MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&[], None, None))));
        api.match_id = Some("ghost".to_string());
        let (_api, session) = session_with(api);

        session.toggle_favorite("ghost");
        let outcome = session.request_match().await;
        assert_eq!(outcome, MatchOutcome::Unresolved("ghost".to_string()));
        assert!(!session.snapshot().match_modal_open);
        assert!(session.matched_dog().is_none());
    }

    #[tokio::test]
    async fn test_match_failure_notifies() {
        let (_api, session) = session_with(MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&[], None, None)))));
        session.toggle_favorite("d1");
        assert_eq!(
            session.request_match().await,
            MatchOutcome::Failed(Notification::match_failed())
        );
    }

    #[tokio::test]
    async fn test_closing_modal_keeps_match() {
        let mut api = MockApi::new(Box::new(|_: &SearchQuery| Ok(page(&["d2"], None, None))));
        api.match_id = Some("d2".to_string());
        let (_api, session) = session_with(api);

        assert!(!session.reopen_match_modal());

        session.search().await;
        session.toggle_favorite("d2");
        session.request_match().await;

        session.close_match_modal();
        let snapshot = session.snapshot();
        assert!(!snapshot.match_modal_open);
        assert!(snapshot.matched.is_some());

        assert!(session.reopen_match_modal());
        assert!(session.snapshot().match_modal_open);
    }
}
