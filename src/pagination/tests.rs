//! Tests for pagination strategies

use super::*;

fn param(params: &crate::types::ParamList, key: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[test]
fn test_cursor_first_request_uses_sentinel() {
    let paginator = CursorMarkPaginator::new(100);
    let state = PaginationState::new();

    let params = paginator.next_params(&state);
    assert_eq!(param(&params, "cursorMark").as_deref(), Some(CURSOR_SENTINEL));
    assert_eq!(param(&params, "rows").as_deref(), Some("100"));
}

#[test]
fn test_cursor_advances_until_fixed_point() {
    let paginator = CursorMarkPaginator::new(2);
    let mut state = PaginationState::new();

    // Page 1: server hands out a new cursor
    let next = paginator.process_response(Some("AoE1"), 2, &mut state);
    assert_eq!(next, NextPage::with_param("cursorMark", "AoE1"));
    assert!(!state.done);
    assert_eq!(state.cursor.as_deref(), Some("AoE1"));

    // Page 2: another new cursor
    let next = paginator.process_response(Some("AoE2"), 1, &mut state);
    assert_eq!(next, NextPage::with_param("cursorMark", "AoE2"));

    // Page 3: cursor repeats -> fixed point, scan over
    let next = paginator.process_response(Some("AoE2"), 0, &mut state);
    assert!(next.is_done());
    assert!(state.done);
    assert_eq!(state.pages, 3);
    assert_eq!(state.total_fetched, 3);
}

#[test]
fn test_cursor_terminates_in_bounded_steps() {
    // A finite matching set reaches the fixed point: simulate a server that
    // advances the cursor once per page and then repeats it.
    let paginator = CursorMarkPaginator::new(10);
    let mut state = PaginationState::new();
    let cursors = ["c1", "c2", "c3", "c3"];

    let mut steps = 0;
    for cursor in cursors {
        steps += 1;
        if paginator
            .process_response(Some(cursor), 10, &mut state)
            .is_done()
        {
            break;
        }
    }

    assert_eq!(steps, 4);
    assert!(state.done);
}

#[test]
fn test_cursor_missing_token_stops() {
    let paginator = CursorMarkPaginator::new(10);
    let mut state = PaginationState::new();

    let next = paginator.process_response(None, 5, &mut state);
    assert!(next.is_done());
    assert!(state.done);
}

#[test]
fn test_single_page_is_one_shot() {
    let paginator = SinglePage::new(25);
    let mut state = PaginationState::new();

    let params = paginator.next_params(&state);
    assert_eq!(param(&params, "rows").as_deref(), Some("25"));
    assert!(param(&params, "cursorMark").is_none());

    let next = paginator.process_response(Some("ignored"), 25, &mut state);
    assert!(next.is_done());
    assert!(state.done);
    assert_eq!(state.total_fetched, 25);
}
