//! Thread flattening.

use std::cmp::Reverse;

use crate::Message;

/// Inserts each thread parent's replies directly after it.
///
/// `fetch_replies` is called once per thread parent. `conversations.replies`
/// returns the parent itself as the first item; that copy is dropped so the
/// parent appears once.
///
/// ```rust
/// use slackpack::Message;
/// use slackpack::export::splice_replies;
///
/// let messages = vec![
///     Message::new("3.0", "later"),
///     Message::new("1.0", "question").with_reply_count(1),
/// ];
/// let flat = splice_replies(messages, |parent| {
///     vec![parent.clone(), Message::new("2.0", "answer").with_thread_ts("1.0")]
/// });
///
/// let texts: Vec<_> = flat.iter().map(|m| m.text.as_str()).collect();
/// assert_eq!(texts, ["later", "question", "answer"]);
/// ```
pub fn splice_replies<F>(messages: Vec<Message>, mut fetch_replies: F) -> Vec<Message>
where
    F: FnMut(&Message) -> Vec<Message>,
{
    let mut flat = Vec::with_capacity(messages.len());

    for msg in messages {
        if !msg.is_thread_parent() {
            flat.push(msg);
            continue;
        }

        let replies = fetch_replies(&msg);
        let parent_ts = msg.ts.clone();
        flat.push(msg);
        flat.extend(replies.into_iter().filter(|reply| reply.ts != parent_ts));
    }

    flat
}

/// Sorts messages newest first. Equal timestamps keep their order.
///
/// Messages with unparsable timestamps sink to the end.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by_cached_key(|msg| Reverse(msg.timestamp().ok()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_replies_follow_parent() {
        let messages = vec![
            Message::new("10.0", "parent").with_reply_count(2),
            Message::new("5.0", "older"),
        ];
        let flat = splice_replies(messages, |_| {
            vec![
                Message::new("11.0", "reply1").with_thread_ts("10.0"),
                Message::new("12.0", "reply2").with_thread_ts("10.0"),
            ]
        });
        assert_eq!(texts(&flat), ["parent", "reply1", "reply2", "older"]);
    }

    #[test]
    fn test_parent_copy_is_dropped() {
        let messages = vec![Message::new("10.0", "parent").with_reply_count(1)];
        let flat = splice_replies(messages, |parent| {
            vec![
                parent.clone(),
                Message::new("11.0", "reply").with_thread_ts("10.0"),
            ]
        });
        assert_eq!(texts(&flat), ["parent", "reply"]);
    }

    #[test]
    fn test_only_parents_trigger_fetch() {
        let mut fetched = Vec::new();
        let messages = vec![
            Message::new("1.0", "a"),
            Message::new("2.0", "b").with_reply_count(1),
            Message::new("3.0", "c").with_reply_count(0),
        ];
        splice_replies(messages, |parent| {
            fetched.push(parent.ts.clone());
            Vec::new()
        });
        assert_eq!(fetched, vec!["2.0".to_string()]);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut messages = vec![
            Message::new("1700000000.000100", "oldest"),
            Message::new("1700000100.000000", "newest"),
            Message::new("1700000050.000000", "middle"),
        ];
        sort_newest_first(&mut messages);
        assert_eq!(texts(&messages), ["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_sort_is_stable_and_sinks_invalid() {
        let mut messages = vec![
            Message::new("garbage", "bad"),
            Message::new("5.0", "first"),
            Message::new("5.0", "second"),
        ];
        sort_newest_first(&mut messages);
        assert_eq!(texts(&messages), ["first", "second", "bad"]);
    }
}
