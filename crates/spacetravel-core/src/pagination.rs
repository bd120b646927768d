//! Incremental "load more" pagination.
//!
//! [`PostsPagination`] holds the post list rendered so far and the cursor of
//! the next page. Each [`load_more`](PostsPagination::load_more) follows the
//! cursor once and appends the results.
//!
//! Only one load runs at a time: a call made while another is in flight
//! returns [`LoadOutcome::Busy`] without fetching, so pages cannot be
//! appended twice or out of order.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::Error;
use crate::posts::{PostList, PostSummary};
use crate::traits::{ContentApi, Notice, Notifier};
use crate::Result;

/// The list rendered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListState {
    pub posts: Vec<PostSummary>,
    pub next_cursor: Option<String>,
}

impl From<PostList> for ListState {
    fn from(list: PostList) -> Self {
        Self {
            posts: list.posts,
            next_cursor: list.next_cursor,
        }
    }
}

/// Result of a [`PostsPagination::load_more`] call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// There is no next page. Nothing was fetched.
    Exhausted,
    /// Another load is in flight. Nothing was fetched.
    Busy,
    /// A page was appended.
    Loaded {
        appended: usize,
        /// Results dropped because their uid was already listed.
        skipped: usize,
    },
    /// The fetch failed. The state is unchanged and the reader was notified.
    Failed(Error),
}

/// Client-side post list with a "load more" action.
pub struct PostsPagination<C, N> {
    api: C,
    notifier: N,
    state: Mutex<ListState>,
    loading: AtomicBool,
}

impl<C, N> PostsPagination<C, N>
where
    C: ContentApi,
    N: Notifier,
{
    /// Start from the first server-rendered page.
    pub fn new(api: C, notifier: N, initial: PostList) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(initial.into()),
            loading: AtomicBool::new(false),
        }
    }

    /// Copy of the current list state.
    pub fn snapshot(&self) -> ListState {
        self.lock().clone()
    }

    /// Whether the "load more" control should be active.
    pub fn has_more(&self) -> bool {
        self.lock().next_cursor.is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().posts.is_empty()
    }

    /// Fetch the next page and append it.
    ///
    /// Failures are recovered locally: the state is left as it was, the
    /// notifier receives [`Notice::LoadMoreFailed`] once, and the call can
    /// simply be repeated.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> LoadOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.loading) else {
            debug!("Load already in flight, ignoring");
            return LoadOutcome::Busy;
        };

        let cursor = {
            let state = self.lock();
            state.next_cursor.clone()
        };

        let Some(cursor) = cursor else {
            return LoadOutcome::Exhausted;
        };

        match self.fetch(&cursor).await {
            Ok((posts, next_cursor)) => {
                let mut state = self.lock();
                let (appended, skipped) = append_unique(&mut state.posts, posts);
                state.next_cursor = next_cursor;
                debug!(appended, skipped, more = state.next_cursor.is_some(), "Loaded more posts");
                LoadOutcome::Loaded { appended, skipped }
            }
            Err(e) => {
                warn!(error = %e, cursor = %cursor, "Failed to load more posts");
                self.notifier.notify(Notice::LoadMoreFailed);
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn fetch(&self, cursor: &str) -> Result<(Vec<PostSummary>, Option<String>)> {
        let page = self.api.fetch_page(cursor).await?;
        let posts = page
            .results
            .iter()
            .map(PostSummary::from_document)
            .collect::<Result<Vec<_>>>()?;
        Ok((posts, page.next_page))
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Append `incoming` in order, dropping posts whose uid is already present.
fn append_unique(posts: &mut Vec<PostSummary>, incoming: Vec<PostSummary>) -> (usize, usize) {
    let mut seen: HashSet<String> = posts.iter().filter_map(|p| p.uid.clone()).collect();
    let mut appended = 0;
    let mut skipped = 0;

    for post in incoming {
        let duplicate = match &post.uid {
            Some(uid) => !seen.insert(uid.clone()),
            None => false,
        };
        if duplicate {
            skipped += 1;
            continue;
        }
        posts.push(post);
        appended += 1;
    }

    (appended, skipped)
}

/// Marks a load as in flight until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    use crate::content::{Document, DocumentPage, Query};
    use crate::error::{ApiError, InvalidInputError};
    use crate::types::ApiUrl;

    struct FakeApi {
        url: ApiUrl,
        responses: Mutex<VecDeque<Result<DocumentPage>>>,
        requested: Mutex<Vec<String>>,
        started: Option<Arc<Notify>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn new(responses: Vec<Result<DocumentPage>>) -> Self {
            Self {
                url: ApiUrl::new("https://api").unwrap(),
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
                started: None,
                gate: None,
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentApi for FakeApi {
        fn api_url(&self) -> &ApiUrl {
            &self.url
        }

        async fn query(&self, _query: &Query) -> Result<DocumentPage> {
            Err(InvalidInputError::Other {
                message: "queries are not used by pagination".to_string(),
            }
            .into())
        }

        async fn fetch_page(&self, url: &str) -> Result<DocumentPage> {
            self.requested.lock().unwrap().push(url.to_string());
            if let Some(started) = &self.started {
                started.notify_one();
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(ApiError::new(500, None, None).into()))
        }
    }

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: Some(uid.to_string()),
            first_publication_date: Some("2021-03-25T19:25:28+0000".to_string()),
            title: format!("Title {uid}"),
            subtitle: "Subtitle".to_string(),
            author: "Author".to_string(),
        }
    }

    fn document(uid: &str) -> Document {
        Document::from_value(json!({
            "id": format!("id-{uid}"),
            "uid": uid,
            "type": "posts",
            "first_publication_date": "2021-03-25T19:25:28+0000",
            "data": { "title": format!("Title {uid}"), "subtitle": "Subtitle", "author": "Author" }
        }))
        .unwrap()
    }

    fn initial(cursor: Option<&str>) -> PostList {
        PostList {
            posts: vec![summary("post-a")],
            next_cursor: cursor.map(String::from),
        }
    }

    fn counting_notifier() -> (Arc<AtomicUsize>, impl Notifier) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let notifier = move |notice: Notice| {
            assert_eq!(notice, Notice::LoadMoreFailed);
            inner.fetch_add(1, Ordering::SeqCst);
        };
        (count, notifier)
    }

    #[tokio::test]
    async fn exhausted_list_is_a_noop() {
        let api = Arc::new(FakeApi::new(vec![]));
        let (notices, notifier) = counting_notifier();
        let pagination = PostsPagination::new(Arc::clone(&api), notifier, initial(None));

        let before = pagination.snapshot();
        assert!(matches!(pagination.load_more().await, LoadOutcome::Exhausted));
        assert_eq!(pagination.snapshot(), before);
        assert!(api.requested().is_empty());
        assert_eq!(notices.load(Ordering::SeqCst), 0);
        assert!(!pagination.has_more());
    }

    #[tokio::test]
    async fn appends_next_page_and_deactivates_control() {
        let api = Arc::new(FakeApi::new(vec![Ok(DocumentPage::new(
            vec![document("post-b")],
            None,
        ))]));
        let (notices, notifier) = counting_notifier();
        let pagination = PostsPagination::new(
            Arc::clone(&api),
            notifier,
            initial(Some("https://api/x?page=2")),
        );
        assert!(pagination.has_more());

        let outcome = pagination.load_more().await;
        assert!(matches!(outcome, LoadOutcome::Loaded { appended: 1, skipped: 0 }));

        let state = pagination.snapshot();
        assert_eq!(state.posts, vec![summary("post-a"), summary("post-b")]);
        assert_eq!(state.next_cursor, None);
        assert!(!pagination.has_more());
        assert_eq!(api.requested(), vec!["https://api/x?page=2".to_string()]);
        assert_eq!(notices.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_keeps_state_notifies_once_and_is_retriable() {
        let api = Arc::new(FakeApi::new(vec![
            Err(ApiError::new(503, None, Some("unavailable".into())).into()),
            Ok(DocumentPage::new(
                vec![document("post-b")],
                Some("https://api/x?page=3".to_string()),
            )),
        ]));
        let (notices, notifier) = counting_notifier();
        let pagination = PostsPagination::new(
            Arc::clone(&api),
            notifier,
            initial(Some("https://api/x?page=2")),
        );

        let before = pagination.snapshot();
        assert!(matches!(
            pagination.load_more().await,
            LoadOutcome::Failed(Error::Api(_))
        ));
        assert_eq!(pagination.snapshot(), before);
        assert_eq!(notices.load(Ordering::SeqCst), 1);

        assert!(matches!(
            pagination.load_more().await,
            LoadOutcome::Loaded { appended: 1, .. }
        ));
        assert_eq!(pagination.len(), 2);
        assert_eq!(
            pagination.snapshot().next_cursor.as_deref(),
            Some("https://api/x?page=3")
        );
        assert_eq!(notices.load(Ordering::SeqCst), 1);
        assert_eq!(
            api.requested(),
            vec!["https://api/x?page=2".to_string(), "https://api/x?page=2".to_string()]
        );
    }

    #[tokio::test]
    async fn malformed_results_count_as_failure() {
        let bad = Document::from_value(json!({
            "id": "bad",
            "uid": "bad",
            "type": "posts",
            "data": { "title": "No author" }
        }))
        .unwrap();
        let api = FakeApi::new(vec![Ok(DocumentPage::new(vec![bad], None))]);
        let (notices, notifier) = counting_notifier();
        let pagination = PostsPagination::new(api, notifier, initial(Some("https://api/x?page=2")));

        let before = pagination.snapshot();
        assert!(matches!(
            pagination.load_more().await,
            LoadOutcome::Failed(Error::SchemaMismatch(_))
        ));
        assert_eq!(pagination.snapshot(), before);
        assert_eq!(notices.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_uids_are_skipped() {
        let api = FakeApi::new(vec![Ok(DocumentPage::new(
            vec![document("post-a"), document("post-c")],
            None,
        ))]);
        let (_, notifier) = counting_notifier();
        let pagination = PostsPagination::new(api, notifier, initial(Some("https://api/x?page=2")));

        assert!(matches!(
            pagination.load_more().await,
            LoadOutcome::Loaded { appended: 1, skipped: 1 }
        ));
        let uids: Vec<_> = pagination
            .snapshot()
            .posts
            .into_iter()
            .filter_map(|p| p.uid)
            .collect();
        assert_eq!(uids, vec!["post-a", "post-c"]);
    }

    #[tokio::test]
    async fn overlapping_call_is_ignored() {
        let started = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let mut api = FakeApi::new(vec![Ok(DocumentPage::new(vec![document("post-b")], None))]);
        api.started = Some(Arc::clone(&started));
        api.gate = Some(Arc::clone(&gate));
        let api = Arc::new(api);

        let (_, notifier) = counting_notifier();
        let pagination = Arc::new(PostsPagination::new(
            Arc::clone(&api),
            notifier,
            initial(Some("https://api/x?page=2")),
        ));

        let first = tokio::spawn({
            let pagination = Arc::clone(&pagination);
            async move { pagination.load_more().await }
        });

        started.notified().await;
        assert!(matches!(pagination.load_more().await, LoadOutcome::Busy));

        gate.notify_one();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded { appended: 1, .. }));
        assert_eq!(api.requested().len(), 1);
        assert_eq!(pagination.len(), 2);

        // The flag is released once the first load completes.
        assert!(matches!(pagination.load_more().await, LoadOutcome::Exhausted));
    }
}
