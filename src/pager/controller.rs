use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::types::{Page, PageRequest};
use crate::core::error::ApiError;
use crate::pager::scroll::ScrollMetrics;

/// Result of one pager trigger. Dropped triggers report why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { appended: usize },
    Skipped(SkipReason),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another request is outstanding; the trigger is dropped, not queued.
    InFlight,
    /// The server said there are no more pages.
    Exhausted,
    /// The viewport is not close enough to the bottom.
    NotNearBottom,
}

/// Serializable view of the cursor and accumulator, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: Option<String>,
}

struct PagerState<T> {
    items: Vec<T>,
    page: u32,
    total_items: u64,
    total_pages: u32,
    has_more: bool,
    filter: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl<T> PagerState<T> {
    fn initial() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_items: 0,
            total_pages: 0,
            has_more: true,
            filter: None,
            loading: false,
            error: None,
        }
    }
}

/// Incremental-loading controller for one list view.
///
/// Drives page fetches in response to scroll position without duplicate
/// concurrent requests and without races between a filter reset and an
/// in-flight page fetch. One instance per view; the entity type and the
/// fetch closure are the per-view parameters.
///
/// The `in_flight` atomic is the correctness guard: it is claimed
/// synchronously before any await point, independent of the `loading` flag,
/// which exists only so the UI can draw a spinner. The two must stay
/// separate. The observable flag is committed under the state lock and is
/// not safe for race prevention.
pub struct Pager<T> {
    in_flight: AtomicBool,
    page_size: u32,
    state: Mutex<PagerState<T>>,
}

impl<T> Pager<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            page_size,
            state: Mutex::new(PagerState::initial()),
        }
    }

    /// Fetches one page and folds it into the accumulator.
    ///
    /// `reset` replaces the accumulator instead of appending and overrides
    /// the exhaustion check: filter changes must always be allowed to
    /// re-fetch page 1. `filter_override` commits a new filter value in the
    /// same logical step as the reload, so the accumulator and the filter
    /// can never be observed mismatched.
    ///
    /// On failure the previous accumulator is left untouched and the error
    /// is stored as view-local display state; it never propagates further.
    pub async fn load_page<F, Fut>(
        &self,
        page: u32,
        reset: bool,
        filter_override: Option<Option<String>>,
        fetch: F,
    ) -> LoadOutcome
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, ApiError>>,
    {
        {
            let state = self.state.lock().unwrap();
            if !state.has_more && !reset && page != 1 {
                return LoadOutcome::Skipped(SkipReason::Exhausted);
            }
        }

        // Synchronous claim; a second trigger while a request is pending is
        // dropped here, never queued.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return LoadOutcome::Skipped(SkipReason::InFlight);
        }

        let request = {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
            if let Some(filter) = filter_override {
                state.filter = filter;
            }
            PageRequest {
                page,
                page_size: self.page_size,
                search: state.filter.clone(),
            }
        };

        let outcome = match fetch(request).await {
            Ok(fetched) => {
                let appended = fetched.items.len();
                let mut state = self.state.lock().unwrap();
                if reset || page == 1 {
                    state.items = fetched.items;
                } else {
                    state.items.extend(fetched.items);
                }
                state.page = fetched.page;
                state.has_more = fetched.has_next;
                state.total_items = fetched.total_items;
                state.total_pages = fetched.total_pages;
                state.loading = false;
                debug!(
                    page = fetched.page,
                    appended,
                    total = state.items.len(),
                    has_more = state.has_more,
                    "Page loaded"
                );
                LoadOutcome::Loaded { appended }
            }
            Err(err) => {
                warn!(page, error = %err, "Page fetch failed");
                let mut state = self.state.lock().unwrap();
                state.error = Some(err.display_message());
                state.loading = false;
                LoadOutcome::Failed
            }
        };

        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Scroll event from the list container. Loads the next page when the
    /// viewport is near the bottom, more pages exist, and no load is in
    /// flight.
    pub async fn on_scroll<F, Fut>(&self, metrics: ScrollMetrics, fetch: F) -> LoadOutcome
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, ApiError>>,
    {
        if !metrics.near_bottom() {
            return LoadOutcome::Skipped(SkipReason::NotNearBottom);
        }

        let next_page = {
            let state = self.state.lock().unwrap();
            if !state.has_more {
                return LoadOutcome::Skipped(SkipReason::Exhausted);
            }
            state.page + 1
        };

        if self.in_flight.load(Ordering::Acquire) {
            return LoadOutcome::Skipped(SkipReason::InFlight);
        }

        self.load_page(next_page, false, None, fetch).await
    }

    /// Filter submit: one logical reset back to page 1 under the new
    /// filter, regardless of prior exhaustion.
    pub async fn on_filter_submit<F, Fut>(
        &self,
        filter: Option<String>,
        fetch: F,
    ) -> LoadOutcome
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, ApiError>>,
    {
        {
            let mut state = self.state.lock().unwrap();
            state.page = 1;
            state.has_more = true;
        }
        self.load_page(1, true, Some(filter), fetch).await
    }

    /// View mount/unmount lifecycle: back to an empty page-1 cursor.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        *state = PagerState::initial();
    }

    pub fn filter(&self) -> Option<String> {
        self.state.lock().unwrap().filter.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl<T: Clone> Pager<T> {
    pub fn snapshot(&self) -> ViewSnapshot<T> {
        let state = self.state.lock().unwrap();
        ViewSnapshot {
            items: state.items.clone(),
            page: state.page,
            page_size: self.page_size,
            total_items: state.total_items,
            total_pages: state.total_pages,
            has_more: state.has_more,
            loading: state.loading,
            error: state.error.clone(),
            filter: state.filter.clone(),
        }
    }
}
