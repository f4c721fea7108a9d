//! Guestbook and chat.
//!
//! Messages are append-only; which messages a screen shows is a pure
//! read-side filter over the full collection.  Group and private messages
//! are mutually exclusive by construction: a message carries exactly one
//! [`MessageKind`].  Posting also records the sender in the side table of
//! known participants (append-if-absent, exact name match).

use chrono::Utc;
use tracing::info;

use fete_shared::time::{format_time, format_timestamp};
use fete_shared::types::{ChatUserId, MessageId};
use fete_store::{ChatUser, Message, MessageKind};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Which slice of the message collection a screen wants.
#[derive(Debug, Clone, Copy)]
pub enum MessageView<'a> {
    /// The shared guestbook.
    Group,
    /// The private thread between `me` and `other`.
    PrivateWith { me: &'a str, other: &'a str },
}

/// Append a message.
///
/// Sender and body are required.  The sender is registered as a chat
/// participant if this is the first time the name posts.
pub fn post_message(
    state: &mut AppState,
    sender_name: &str,
    body: &str,
    kind: MessageKind,
) -> Result<Message> {
    let sender_name = sender_name.trim();
    let body = body.trim();
    if sender_name.is_empty() {
        return Err(AppError::Validation("Please enter your name".to_string()));
    }
    if body.is_empty() {
        return Err(AppError::Validation("Please enter a message".to_string()));
    }

    let message = Message {
        id: MessageId::new(),
        sender_name: sender_name.to_string(),
        body: body.to_string(),
        time_label: format_time(&Utc::now()),
        kind,
    };

    let appended = message.clone();
    state.messages.mutate(&state.db, move |items| {
        let mut next = items.to_vec();
        next.push(appended);
        next
    })?;

    register_sender(state, sender_name)?;

    info!(id = %message.id, sender = sender_name, "message posted");
    Ok(message)
}

/// Record a sender in the side table unless the exact name is already
/// present.  Names are never case-normalized.
fn register_sender(state: &mut AppState, name: &str) -> Result<()> {
    if state.chat_users.items().iter().any(|u| u.name == name) {
        return Ok(());
    }

    let user = ChatUser {
        id: ChatUserId::new(),
        name: name.to_string(),
        last_seen: format_timestamp(&Utc::now()),
    };
    state.chat_users.mutate(&state.db, move |items| {
        let mut next = items.to_vec();
        next.push(user);
        next
    })?;
    Ok(())
}

/// The messages a view shows, in posting order.
pub fn visible_messages<'a>(state: &'a AppState, view: MessageView<'_>) -> Vec<&'a Message> {
    state
        .messages
        .items()
        .iter()
        .filter(|message| match view {
            MessageView::Group => matches!(message.kind, MessageKind::Group),
            MessageView::PrivateWith { me, other } => match &message.kind {
                MessageKind::Private { recipient_name, .. } => {
                    (message.sender_name == me && recipient_name == other)
                        || (message.sender_name == other && recipient_name == me)
                }
                MessageKind::Group => false,
            },
        })
        .collect()
}

/// Every known chat participant, in first-seen order.
pub fn participants(state: &AppState) -> &[ChatUser] {
    state.chat_users.items()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fete_store::Database;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("fete.db")).unwrap();
        let state = AppState::load(db, dir.path().join("photos"));
        (state, dir)
    }

    fn private_to(name: &str) -> MessageKind {
        MessageKind::Private {
            recipient_id: None,
            recipient_name: name.to_string(),
        }
    }

    #[test]
    fn post_requires_sender_and_body() {
        let (mut state, _dir) = test_state();
        assert!(post_message(&mut state, " ", "hi", MessageKind::Group).is_err());
        assert!(post_message(&mut state, "Alice", "  ", MessageKind::Group).is_err());
        assert!(state.messages.is_empty());
        assert!(state.chat_users.is_empty());
    }

    #[test]
    fn group_messages_invisible_to_private_views() {
        let (mut state, _dir) = test_state();
        post_message(&mut state, "Alice", "congrats!", MessageKind::Group).unwrap();
        post_message(&mut state, "Bob", "so happy for you", MessageKind::Group).unwrap();

        assert_eq!(visible_messages(&state, MessageView::Group).len(), 2);
        assert!(visible_messages(
            &state,
            MessageView::PrivateWith {
                me: "Alice",
                other: "Bob"
            }
        )
        .is_empty());
        assert!(visible_messages(
            &state,
            MessageView::PrivateWith {
                me: "Bob",
                other: "Alice"
            }
        )
        .is_empty());
    }

    #[test]
    fn private_thread_is_symmetric_and_isolated() {
        let (mut state, _dir) = test_state();
        post_message(&mut state, "Alice", "psst", private_to("Bob")).unwrap();
        post_message(&mut state, "Bob", "hey!", private_to("Alice")).unwrap();
        post_message(&mut state, "Carol", "private to Bob", private_to("Bob")).unwrap();

        let thread = visible_messages(
            &state,
            MessageView::PrivateWith {
                me: "Alice",
                other: "Bob",
            },
        );
        let bodies: Vec<_> = thread.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["psst", "hey!"]);

        assert!(visible_messages(&state, MessageView::Group).is_empty());
    }

    #[test]
    fn first_post_registers_sender_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("fete.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            let mut state = AppState::load(db, dir.path().join("photos"));
            post_message(&mut state, "Alice", "congrats!", MessageKind::Group).unwrap();
            assert_eq!(participants(&state).len(), 1);
        }

        let db = Database::open_at(&db_path).unwrap();
        let state = AppState::load(db, dir.path().join("photos"));
        assert_eq!(participants(&state)[0].name, "Alice");
    }

    #[test]
    fn senders_are_registered_once_by_exact_name() {
        let (mut state, _dir) = test_state();
        post_message(&mut state, "Alice", "one", MessageKind::Group).unwrap();
        post_message(&mut state, "Alice", "two", MessageKind::Group).unwrap();
        post_message(&mut state, "alice", "three", MessageKind::Group).unwrap();

        let names: Vec<_> = participants(&state).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alice", "alice"]);
    }
}
