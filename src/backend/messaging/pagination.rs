//! In-memory cursor pagination
//!
//! Used when the ordered scan is unavailable. Produces the same pages as the
//! indexed path: `limit` messages strictly after the cursor in
//! (created_at DESC, id DESC) order, returned oldest first.

use std::cmp::Ordering;

use crate::shared::messaging::Message;

/// (created_at DESC, id DESC)
pub fn newest_first(a: &Message, b: &Message) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort in place, newest first
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(newest_first);
}

/// Cut one page out of an unordered message list
///
/// A cursor that names no message in `messages` is ignored and the page
/// starts from the newest message.
pub fn paginate(mut messages: Vec<Message>, cursor: Option<&str>, limit: usize) -> Vec<Message> {
    sort_newest_first(&mut messages);

    let start = cursor
        .and_then(|cursor| messages.iter().position(|m| m.id == cursor))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let mut page: Vec<Message> = messages.into_iter().skip(start).take(limit).collect();
    page.reverse();
    page
}

/// The cursor for the page after `page` (its oldest entry), if it was full
pub fn next_cursor(page: &[Message], limit: usize) -> Option<&str> {
    if page.len() < limit {
        return None;
    }
    page.first().map(|m| m.id.as_str())
}
