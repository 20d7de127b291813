//! Admin Forwarder module: delivers completed submissions to the admin chat

use anyhow::Result;
use std::borrow::Cow;
use teloxide::types::{ChatId, UserId};
use teloxide::utils::html::escape;
use tracing::{debug, error};

use crate::dialogue::MessageType;
use crate::localization::{t, t_args};

use super::messenger::{parse_destination, DeliveryError, Messenger};
use super::ui_builder::Keyboard;

/// Who sent a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub full_name: String,
    pub username: Option<String>,
}

/// A completed piece of user text destined for the administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub message_type: MessageType,
    pub sender: Sender,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered,
    Failed,
}

/// Longest text Telegram accepts in one message, counted after HTML parsing
pub const MAX_MESSAGE_CHARS: usize = 4096;

const TRUNCATION_MARK: char = '…';

/// Cut `body` to at most `budget` characters, marking the cut
fn truncate_body(body: &str, budget: usize) -> Cow<'_, str> {
    if body.chars().count() <= budget {
        return Cow::Borrowed(body);
    }
    let mut cut: String = body.chars().take(budget.saturating_sub(1)).collect();
    cut.push(TRUNCATION_MARK);
    Cow::Owned(cut)
}

/// Format the notification the administrator receives.
///
/// The body is truncated so the whole notification fits in one message.
/// It is cut before escaping, so entities stay whole and count as one
/// character each.
pub fn format_admin_notification(submission: &Submission) -> String {
    let sender = &submission.sender;
    let handle = match sender.username.as_deref() {
        Some(username) => format!("@{}", escape(username)),
        None => t("admin-no-username"),
    };
    let display_name = submission.message_type.display_name().to_uppercase();
    let message_type = submission.message_type.to_string();
    let id = sender.id.to_string();

    let header = format!(
        "{}\n\n{}\n{}\n{}\n\n{}\n",
        t_args("admin-header", &[("kind", display_name.as_str())]),
        t_args(
            "admin-from",
            &[("name", escape(&sender.full_name).as_str()), ("handle", handle.as_str())]
        ),
        t_args("admin-user-id", &[("id", id.as_str())]),
        t_args("admin-type", &[("kind", message_type.as_str())]),
        t("admin-text"),
    );

    // Markup in the header is counted too, which only errs on the short side
    let budget = MAX_MESSAGE_CHARS.saturating_sub(header.chars().count());
    let body = truncate_body(&submission.body, budget);

    format!("{header}{}", escape(&body))
}

pub struct AdminForwarder {
    destination: String,
}

impl AdminForwarder {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Deliver one submission and tell the sender how it went.
    ///
    /// Delivery failures are logged and reported to the user, never
    /// returned; only a failure to reply to the user is an error.
    pub async fn forward<M>(
        &self,
        messenger: &M,
        reply_to: ChatId,
        submission: Submission,
    ) -> Result<ForwardOutcome>
    where
        M: Messenger + ?Sized,
    {
        let user_id = submission.sender.id;
        let message_type = submission.message_type;

        let outcome = match self.deliver(messenger, &submission).await {
            Ok(()) => {
                debug!(user_id = %user_id, message_type = %message_type, "Submission delivered to admin");
                ForwardOutcome::Delivered
            }
            Err(e) => {
                error!(
                    user_id = %user_id,
                    message_type = %message_type,
                    destination = %self.destination,
                    error = %e,
                    "Failed to deliver submission to admin"
                );
                ForwardOutcome::Failed
            }
        };

        let reply = match outcome {
            ForwardOutcome::Delivered => t_args(
                "submission-sent",
                &[("kind", message_type.display_name().as_str())],
            ),
            ForwardOutcome::Failed => t("submission-failed"),
        };
        messenger
            .send_text(reply_to.into(), reply, Keyboard::MainMenu)
            .await?;

        Ok(outcome)
    }

    async fn deliver<M>(&self, messenger: &M, submission: &Submission) -> Result<(), DeliveryError>
    where
        M: Messenger + ?Sized,
    {
        let destination = parse_destination(&self.destination)?;
        messenger
            .send_text(
                destination,
                format_admin_notification(submission),
                Keyboard::Unchanged,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;

    fn submission(username: Option<&str>, body: &str) -> Submission {
        Submission {
            message_type: MessageType::Idea,
            sender: Sender {
                id: UserId(555),
                full_name: "Steve <Crafter>".to_string(),
                username: username.map(str::to_string),
            },
            body: body.to_string(),
        }
    }

    #[test]
    fn test_notification_fields() {
        let text = format_admin_notification(&submission(Some("steve"), "Add a new game mode"));
        assert!(text.to_lowercase().contains("idea"));
        assert!(text.contains("@steve"));
        assert!(text.contains("555"));
        assert!(text.contains("Add a new game mode"));
    }

    #[test]
    fn test_notification_placeholder_without_username() {
        let text = format_admin_notification(&submission(None, "body"));
        assert!(text.contains(&t("admin-no-username")));
    }

    #[test]
    fn test_notification_escapes_user_content() {
        let text = format_admin_notification(&submission(None, "a < b & c"));
        assert!(text.contains("Steve &lt;Crafter&gt;"));
        assert!(text.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_application_type_line() {
        let mut sub = submission(None, "filled form");
        sub.message_type = MessageType::Application(Role::TikTok);
        let text = format_admin_notification(&sub);
        assert!(text.contains("application: TikTok"));
    }

    /// Length as Telegram counts it: tags dropped, entities decoded
    fn visible_len(html: &str) -> usize {
        let mut plain = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => plain.push(c),
                _ => {}
            }
        }
        plain
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
            .chars()
            .count()
    }

    #[test]
    fn test_long_body_is_truncated_to_fit() {
        let text = format_admin_notification(&submission(Some("steve"), &"a".repeat(5000)));
        assert!(text.chars().count() <= MAX_MESSAGE_CHARS);
        assert!(text.contains("@steve"));
        assert!(text.ends_with("aaa…"));
    }

    #[test]
    fn test_escaped_body_is_truncated_on_entity_boundaries() {
        let text = format_admin_notification(&submission(None, &"<".repeat(MAX_MESSAGE_CHARS)));
        assert!(visible_len(&text) <= MAX_MESSAGE_CHARS);
        assert!(text.contains("555"));
        assert!(text.ends_with("&lt;…"));
    }

    #[test]
    fn test_body_that_fits_is_untouched() {
        let body = "b".repeat(3000);
        let text = format_admin_notification(&submission(None, &body));
        assert!(text.ends_with(&body));
        assert!(!text.contains(TRUNCATION_MARK));
    }
}
