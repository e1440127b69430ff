use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::message::MessageRow;

/// One inbox row: everything exchanged with a single counterpart, summarized
/// by the most recent message.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub counterpart_id: Uuid,
    pub last_message: MessageRow,
    pub unread_count: usize,
    pub message_count: usize,
}

/// Groups a user's messages by counterpart. The unread count only covers
/// messages sent *to* `user_id` by that counterpart; conversations are
/// ordered by their most recent message, newest first.
pub fn group_conversations(user_id: Uuid, messages: &[MessageRow]) -> Vec<ConversationSummary> {
    let mut by_counterpart: HashMap<Uuid, ConversationSummary> = HashMap::new();

    for message in messages {
        let counterpart = if message.sender_id == user_id {
            message.receiver_id
        } else if message.receiver_id == user_id {
            message.sender_id
        } else {
            continue; // not this user's message
        };

        let unread = (message.receiver_id == user_id && !message.is_read) as usize;

        match by_counterpart.get_mut(&counterpart) {
            Some(summary) => {
                summary.message_count += 1;
                summary.unread_count += unread;
                if message.created_at > summary.last_message.created_at {
                    summary.last_message = message.clone();
                }
            }
            None => {
                by_counterpart.insert(
                    counterpart,
                    ConversationSummary {
                        counterpart_id: counterpart,
                        last_message: message.clone(),
                        unread_count: unread,
                        message_count: 1,
                    },
                );
            }
        }
    }

    let mut conversations: Vec<_> = by_counterpart.into_values().collect();
    conversations.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
    conversations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn message(
        sender: Uuid,
        receiver: Uuid,
        at: DateTime<Utc>,
        is_read: bool,
    ) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            subject: None,
            content: "hello".to_string(),
            is_urgent: false,
            is_read,
            parent_id: None,
            created_at: at,
        }
    }

    #[test]
    fn test_empty_inbox() {
        assert!(group_conversations(Uuid::new_v4(), &[]).is_empty());
    }

    #[test]
    fn test_two_way_exchange_groups_into_one_thread() {
        // A's message is older, so B's reply is the thread summary.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let t0 = Utc::now();
        let older = message(a, b, t0, true);
        let newer = message(b, a, t0 + Duration::minutes(5), false);
        let msgs = vec![older, newer.clone()];

        let conversations = group_conversations(a, &msgs);
        assert_eq!(conversations.len(), 1);
        let thread = &conversations[0];
        assert_eq!(thread.counterpart_id, b);
        assert_eq!(thread.last_message.id, newer.id);
        assert_eq!(thread.message_count, 2);
        assert_eq!(thread.unread_count, 1);
    }

    #[test]
    fn test_unread_count_ignores_own_unread_messages() {
        // A message the user *sent* that the counterpart has not read
        // must not count toward the user's unread total.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let msgs = vec![message(a, b, Utc::now(), false)];
        let conversations = group_conversations(a, &msgs);
        assert_eq!(conversations[0].unread_count, 0);
    }

    #[test]
    fn test_threads_ordered_by_latest_message_desc() {
        let me = Uuid::new_v4();
        let quiet = Uuid::new_v4();
        let active = Uuid::new_v4();
        let t0 = Utc::now();
        let msgs = vec![
            message(quiet, me, t0, false),
            message(active, me, t0 + Duration::hours(1), false),
            message(me, quiet, t0 - Duration::hours(2), true),
        ];

        let conversations = group_conversations(me, &msgs);
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].counterpart_id, active);
        assert_eq!(conversations[1].counterpart_id, quiet);
    }

    #[test]
    fn test_read_messages_not_counted_unread() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let t0 = Utc::now();
        let msgs = vec![
            message(other, me, t0, true),
            message(other, me, t0 + Duration::minutes(1), false),
            message(other, me, t0 + Duration::minutes(2), false),
        ];
        let conversations = group_conversations(me, &msgs);
        assert_eq!(conversations[0].unread_count, 2);
        assert_eq!(conversations[0].message_count, 3);
    }

    #[test]
    fn test_messages_of_other_pairs_ignored() {
        let me = Uuid::new_v4();
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let msgs = vec![message(x, y, Utc::now(), false)];
        assert!(group_conversations(me, &msgs).is_empty());
    }
}
