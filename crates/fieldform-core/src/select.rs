//! Searchable single-value selection
//!
//! [`SearchableSelect`] is a combobox state machine over a string domain.
//! In local mode the displayed list is a synchronous case-insensitive
//! substring filter of the options. In remote mode keystrokes update the
//! transient query immediately, but the [`Searcher`] fires only once the
//! input has been stable for the debounce interval, and a query identical
//! to the last one actually sent is suppressed.
//!
//! In-flight network calls are never cancelled. Every fired request carries
//! a monotonically increasing token and a response is applied only when its
//! token is still the latest issued, so a stale reply can never overwrite a
//! newer result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Debounce interval used when the caller does not pick one.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Failure reported by a [`Searcher`]. The previously displayed list is
/// retained; the error is held for the caller to collect.
#[derive(Debug, Clone, Error)]
#[error("search failed: {message}")]
pub struct SearchError {
    message: String,
}

impl SearchError {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Server-delegated search over the option domain.
#[async_trait]
pub trait Searcher: Send + Sync + 'static {
    /// Run a remote search for `query`.
    ///
    /// `Ok(None)` means the query was skipped by caller policy (for example
    /// below a minimum length) and the current list should be kept.
    async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError>;
}

#[derive(Default)]
struct SelectState {
    options: Vec<String>,
    value: String,
    query: String,
    open: bool,
    loading: bool,
    last_sent: Option<String>,
    latest_token: u64,
    in_flight: usize,
    last_error: Option<SearchError>,
}

struct RemoteSearch {
    searcher: Arc<dyn Searcher>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

/// Single-value picker over a string domain.
pub struct SearchableSelect {
    state: Arc<Mutex<SelectState>>,
    remote: Option<RemoteSearch>,
    placeholder: String,
}

impl SearchableSelect {
    /// Picker with client-side substring filtering.
    pub fn local(options: Vec<String>) -> Self {
        let state = SelectState {
            options,
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            remote: None,
            placeholder: String::new(),
        }
    }

    /// Picker whose option list is refreshed by a debounced remote search.
    pub fn remote(searcher: Arc<dyn Searcher>) -> Self {
        Self::remote_with_debounce(searcher, DEFAULT_DEBOUNCE)
    }

    pub fn remote_with_debounce(searcher: Arc<dyn Searcher>, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SelectState::default())),
            remote: Some(RemoteSearch {
                searcher,
                debounce,
                pending: None,
            }),
            placeholder: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replace the option domain, e.g. after the initial registry load.
    pub fn set_options(&self, options: Vec<String>) {
        self.state.lock().options = options;
    }

    /// Commit a value programmatically. Used for free-form values already
    /// present in the form state before the domain loaded.
    pub fn set_value(&self, value: impl Into<String>) {
        self.state.lock().value = value.into();
    }

    pub fn value(&self) -> String {
        self.state.lock().value.clone()
    }

    /// Committed value in closed state, or the placeholder when unset.
    pub fn display_label(&self) -> String {
        let value = self.value();
        if value.is_empty() {
            self.placeholder.clone()
        } else {
            value
        }
    }

    /// Flag an external domain load in progress.
    pub fn set_loading(&self, loading: bool) {
        self.state.lock().loading = loading;
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    pub fn open(&mut self) {
        self.state.lock().open = true;
    }

    /// Close without committing, e.g. a click outside the popover. The
    /// transient query is cleared; the committed value is unaffected.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Commit `option` and close. Returns false (and changes nothing) when
    /// the option is not in the currently displayed list.
    pub fn select(&mut self, option: &str) -> bool {
        if !self.displayed().iter().any(|o| o == option) {
            return false;
        }
        self.state.lock().value = option.to_string();
        self.close();
        true
    }

    /// Record a keystroke. In remote mode this re-arms the debounce timer;
    /// at most one pending timer exists at a time.
    pub fn input(&mut self, text: &str) {
        self.state.lock().query = text.to_string();
        if self.is_open() {
            self.arm_search();
        }
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    /// The list a UI should render: filtered options in local mode, the
    /// latest remote result otherwise.
    pub fn displayed(&self) -> Vec<String> {
        let state = self.state.lock();
        if self.remote.is_some() {
            state.options.clone()
        } else {
            let needle = state.query.to_lowercase();
            state
                .options
                .iter()
                .filter(|o| o.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
    }

    /// True while a remote call is outstanding or the domain is loading.
    pub fn is_searching(&self) -> bool {
        let state = self.state.lock();
        state.loading || state.in_flight > 0
    }

    /// True when the effective list is empty and nothing is outstanding.
    pub fn no_options(&self) -> bool {
        !self.is_searching() && self.displayed().is_empty()
    }

    /// Collect the most recent search failure, if any.
    pub fn take_error(&self) -> Option<SearchError> {
        self.state.lock().last_error.take()
    }

    fn close(&mut self) {
        if let Some(remote) = self.remote.as_mut() {
            if let Some(handle) = remote.pending.take() {
                handle.abort();
            }
        }
        let mut state = self.state.lock();
        state.open = false;
        state.query.clear();
    }

    fn arm_search(&mut self) {
        let Some(remote) = self.remote.as_mut() else {
            return;
        };
        if let Some(handle) = remote.pending.take() {
            handle.abort();
        }
        if self.state.lock().query.trim().is_empty() {
            return;
        }

        let state = Arc::clone(&self.state);
        let searcher = Arc::clone(&remote.searcher);
        let debounce = remote.debounce;
        // The pending handle covers only the timer phase. Once the request
        // is dispatched it runs detached: in-flight calls are not cancelled,
        // their replies are discarded by token instead.
        remote.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let (query, token) = {
                let mut s = state.lock();
                let query = s.query.trim().to_string();
                if query.is_empty() {
                    return;
                }
                if s.last_sent.as_deref() == Some(query.as_str()) {
                    tracing::debug!(query = %query, "suppressing duplicate search");
                    return;
                }
                s.last_sent = Some(query.clone());
                s.latest_token += 1;
                s.in_flight += 1;
                (query, s.latest_token)
            };

            tokio::spawn(async move {
                let result = searcher.search(&query).await;

                let mut s = state.lock();
                s.in_flight -= 1;
                match result {
                    Ok(Some(options)) => {
                        if token == s.latest_token {
                            s.options = options;
                        } else {
                            tracing::debug!(
                                token,
                                latest = s.latest_token,
                                "discarding stale search response"
                            );
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(query = %query, "search skipped by caller policy");
                    }
                    Err(err) => {
                        tracing::warn!(query = %query, error = %err, "remote search failed");
                        s.last_error = Some(err);
                    }
                }
            });
        }));
    }
}

impl Drop for SearchableSelect {
    fn drop(&mut self) {
        if let Some(remote) = self.remote.as_mut() {
            if let Some(handle) = remote.pending.take() {
                handle.abort();
            }
        }
        // Invalidate the token so replies still in flight are discarded.
        self.state.lock().latest_token = u64::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSearcher {
        calls: Mutex<Vec<String>>,
        response: Result<Option<Vec<String>>, SearchError>,
    }

    impl RecordingSearcher {
        fn returning(options: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Ok(Some(options.iter().map(|s| s.to_string()).collect())),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Err(SearchError::new(message)),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Searcher for RecordingSearcher {
        async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError> {
            self.calls.lock().push(query.to_string());
            self.response.clone()
        }
    }

    /// Responds with the query itself after a fixed delay. Lets tests
    /// overlap two in-flight searches.
    struct SlowSearcher {
        delay: Duration,
    }

    #[async_trait]
    impl Searcher for SlowSearcher {
        async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError> {
            tokio::time::sleep(self.delay).await;
            Ok(Some(vec![query.to_string()]))
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn local_filter_is_case_insensitive() {
        let mut select =
            SearchableSelect::local(vec!["A".into(), "Ab".into(), "B".into()]);
        select.open();
        select.input("a");
        assert_eq!(select.displayed(), vec!["A", "Ab"]);
    }

    #[test]
    fn closing_clears_query_but_keeps_value() {
        let mut select = SearchableSelect::local(vec!["A".into(), "B".into()]);
        select.open();
        select.input("a");
        assert!(select.select("A"));
        assert!(!select.is_open());
        assert_eq!(select.query(), "");
        assert_eq!(select.value(), "A");

        select.open();
        select.input("b");
        select.dismiss();
        assert_eq!(select.query(), "");
        assert_eq!(select.value(), "A");
    }

    #[test]
    fn select_rejects_values_not_displayed() {
        let mut select = SearchableSelect::local(vec!["A".into()]);
        select.open();
        assert!(!select.select("Z"));
        assert_eq!(select.value(), "");
    }

    #[test]
    fn placeholder_shows_until_a_value_commits() {
        let mut select =
            SearchableSelect::local(vec!["A".into()]).with_placeholder("Select a salesman");
        assert_eq!(select.display_label(), "Select a salesman");
        select.open();
        select.select("A");
        assert_eq!(select.display_label(), "A");
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_coalesce_into_one_call() {
        let searcher = RecordingSearcher::returning(&["Alice", "Albert"]);
        let mut select = SearchableSelect::remote(Arc::clone(&searcher) as Arc<dyn Searcher>);
        select.open();

        select.input("a");
        tokio::time::sleep(Duration::from_millis(200)).await;
        select.input("al");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(searcher.calls(), vec!["al"]);
        assert_eq!(select.displayed(), vec!["Alice", "Albert"]);
    }

    #[tokio::test(start_paused = true)]
    async fn identical_query_is_not_re_sent() {
        let searcher = RecordingSearcher::returning(&["Alice"]);
        let mut select = SearchableSelect::remote(Arc::clone(&searcher) as Arc<dyn Searcher>);
        select.open();
        select.input("al");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(searcher.calls(), vec!["al"]);

        // Reopen with unchanged text.
        select.dismiss();
        select.open();
        select.input("al");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(searcher.calls(), vec!["al"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_query_never_fires() {
        let searcher = RecordingSearcher::returning(&["Alice"]);
        let mut select = SearchableSelect::remote(Arc::clone(&searcher) as Arc<dyn Searcher>);
        select.open();
        select.input("   ");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;
        assert!(searcher.calls().is_empty());

        assert!(select.no_options());
        select.set_loading(true);
        assert!(select.is_searching());
        assert!(!select.no_options());
        select.set_loading(false);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_search_keeps_previous_list() {
        let searcher = RecordingSearcher::failing("boom");
        let mut select = SearchableSelect::remote(Arc::clone(&searcher) as Arc<dyn Searcher>);
        select.set_options(vec!["Existing".into()]);
        select.open();
        select.input("al");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(select.displayed(), vec!["Existing"]);
        assert!(select.take_error().is_some());
        assert!(select.take_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let searcher: Arc<dyn Searcher> = Arc::new(SlowSearcher {
            delay: Duration::from_millis(300),
        });
        let mut select = SearchableSelect::remote_with_debounce(
            searcher,
            Duration::from_millis(100),
        );
        select.open();

        // First search fires at t=100 and resolves at t=400.
        select.input("first");
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(select.is_searching());

        // Second search fires at t=250 and resolves at t=550, after which
        // the first reply lands with an outdated token.
        select.input("second");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(select.displayed(), vec!["second"]);
        assert!(!select.is_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn skipped_query_keeps_current_list() {
        struct MinLen;
        #[async_trait]
        impl Searcher for MinLen {
            async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError> {
                if query.len() < 2 {
                    return Ok(None);
                }
                Ok(Some(vec![format!("{query}-match")]))
            }
        }

        let mut select = SearchableSelect::remote(Arc::new(MinLen));
        select.set_options(vec!["Seeded".into()]);
        select.open();
        select.input("a");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(select.displayed(), vec!["Seeded"]);

        select.input("ab");
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(select.displayed(), vec!["ab-match"]);
    }
}
