//! Property-based tests for in-memory cursor pagination
//!
//! Walking back page by page from the newest message must visit every
//! message exactly once, and the stitched pages must equal the full history
//! in (created_at, id) order.

#[cfg(feature = "ssr")]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use yapyap::backend::messaging::pagination::{next_cursor, paginate};
    use yapyap::shared::messaging::{Message, MessageType};

    fn message(n: usize, millis: i64) -> Message {
        Message {
            id: format!("msg-{n:04}"),
            chat_id: "chat".into(),
            sender_id: if n % 2 == 0 { "a".into() } else { "b".into() },
            content: format!("content {n}"),
            message_type: MessageType::Text,
            is_read: false,
            created_at: Utc.timestamp_millis_opt(millis).unwrap(),
        }
    }

    /// Messages with heavily colliding timestamps, in arbitrary order
    fn history() -> impl Strategy<Value = Vec<Message>> {
        prop::collection::vec(0i64..20, 0..60)
            .prop_map(|stamps| {
                stamps
                    .into_iter()
                    .enumerate()
                    .map(|(n, millis)| message(n, 1_700_000_000_000 + millis))
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    fn chronological(mut messages: Vec<Message>) -> Vec<Message> {
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        messages
    }

    proptest! {
        #[test]
        fn stitched_pages_reproduce_history(messages in history(), limit in 1usize..10) {
            let expected = chronological(messages.clone());

            let mut pages: Vec<Vec<Message>> = Vec::new();
            let mut cursor: Option<String> = None;
            loop {
                let page = paginate(messages.clone(), cursor.as_deref(), limit);
                prop_assert!(page.len() <= limit);
                cursor = next_cursor(&page, limit).map(str::to_string);
                pages.push(page);
                if cursor.is_none() {
                    break;
                }
            }

            let stitched: Vec<Message> = pages.into_iter().rev().flatten().collect();
            prop_assert_eq!(stitched, expected);
        }

        #[test]
        fn every_page_is_oldest_first(messages in history(), limit in 1usize..10) {
            let page = paginate(messages, None, limit);
            for pair in page.windows(2) {
                let ordered = (pair[0].created_at, &pair[0].id) < (pair[1].created_at, &pair[1].id);
                prop_assert!(ordered);
            }
        }

        #[test]
        fn unknown_cursor_matches_first_page(messages in history(), limit in 1usize..10) {
            let first = paginate(messages.clone(), None, limit);
            let unknown = paginate(messages, Some("no-such-id"), limit);
            prop_assert_eq!(unknown, first);
        }
    }
}
