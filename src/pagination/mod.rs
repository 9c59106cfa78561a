//! Pagination module
//!
//! Deep paging over stable-sorted Solr result sets.
//!
//! # Overview
//!
//! Solr's `cursorMark` protocol issues an opaque token with every page of a
//! sorted result set. The client echoes the token back to fetch the next
//! page and stops when the returned token equals the one it just sent (the
//! fixed point). The strategies here compute request parameters and detect
//! that fixed point; the scan loop in [`crate::solr`] drives the HTTP side.

mod strategies;
mod types;

pub use strategies::{CursorMarkPaginator, SinglePage};
pub use types::{NextPage, PaginationState, Paginator, CURSOR_SENTINEL};

#[cfg(test)]
mod tests;
