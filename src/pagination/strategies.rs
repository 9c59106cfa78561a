//! Pagination strategy implementations

use super::types::{NextPage, PaginationState, Paginator, CURSOR_SENTINEL};
use crate::types::ParamList;

// ============================================================================
// Cursor Mark Pagination
// ============================================================================

/// Solr `cursorMark` deep paging.
///
/// Every request carries the cursor from the previous response (`*` on the
/// first request). The server echoes a `nextCursorMark` with each page;
/// when it equals the cursor that was sent, the result set is exhausted.
/// Correctness requires a stable total order on the result set, so the scan
/// layer refuses to start without a sort expression.
#[derive(Debug, Clone)]
pub struct CursorMarkPaginator {
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Rows per page
    pub batch_size: u32,
}

impl CursorMarkPaginator {
    /// Create a paginator with the given batch size
    pub fn new(batch_size: u32) -> Self {
        Self {
            cursor_param: "cursorMark".to_string(),
            batch_size,
        }
    }

    fn sent_cursor(state: &PaginationState) -> String {
        state
            .cursor
            .clone()
            .unwrap_or_else(|| CURSOR_SENTINEL.to_string())
    }
}

impl Paginator for CursorMarkPaginator {
    fn next_params(&self, state: &PaginationState) -> ParamList {
        vec![
            (self.cursor_param.clone(), Self::sent_cursor(state)),
            ("rows".to_string(), self.batch_size.to_string()),
        ]
    }

    fn process_response(
        &self,
        new_cursor: Option<&str>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(records_count as u64);

        let Some(new_cursor) = new_cursor else {
            // Server did not advance a cursor; nothing further to fetch.
            state.mark_done();
            return NextPage::Done;
        };

        if Self::sent_cursor(state) == new_cursor {
            state.mark_done();
            return NextPage::Done;
        }

        state.cursor = Some(new_cursor.to_string());
        NextPage::with_param(self.cursor_param.as_str(), new_cursor)
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// Capped, non-paginated mode: one bounded query, exactly that page.
#[derive(Debug, Clone)]
pub struct SinglePage {
    /// Row count for the single request
    pub rows: u32,
}

impl SinglePage {
    /// Create a single-page strategy with an explicit row count
    pub fn new(rows: u32) -> Self {
        Self { rows }
    }
}

impl Paginator for SinglePage {
    fn next_params(&self, _state: &PaginationState) -> ParamList {
        vec![("rows".to_string(), self.rows.to_string())]
    }

    fn process_response(
        &self,
        _new_cursor: Option<&str>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(records_count as u64);
        state.mark_done();
        NextPage::Done
    }
}
