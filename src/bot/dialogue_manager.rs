//! Dialogue Manager module: turns state machine effects into replies

use anyhow::Result;
use tracing::info;

use crate::dialogue::DialogEffect;
use crate::localization::{t, t_args};

use super::admin_forwarder::{AdminForwarder, Submission};
use super::messenger::Messenger;
use super::router::IncomingMessage;
use super::ui_builder::{format_role_template, format_welcome, Keyboard};

/// Reply text and keyboard for effects that only answer the user
fn reply_for(effect: &DialogEffect) -> Option<(String, Keyboard)> {
    let reply = match effect {
        DialogEffect::PromptIdea => (t("idea-prompt"), Keyboard::Remove),
        DialogEffect::PromptComplaint => (t("complaint-prompt"), Keyboard::Remove),
        DialogEffect::PromptRole => (t("role-prompt"), Keyboard::RoleChoice),
        DialogEffect::ShowRoleTemplate(role) => (format_role_template(*role), Keyboard::Remove),
        DialogEffect::RepromptRole => (t("role-reprompt"), Keyboard::RoleChoice),
        DialogEffect::RepromptText(message_type) => (
            t_args(
                "text-reprompt",
                &[("kind", message_type.display_name().as_str())],
            ),
            Keyboard::Unchanged,
        ),
        DialogEffect::Cancelled => (t("cancelled"), Keyboard::MainMenu),
        DialogEffect::MainMenu => (format_welcome(), Keyboard::MainMenu),
        DialogEffect::NotActive => (t("use-menu-buttons"), Keyboard::MainMenu),
        DialogEffect::Submit { .. } => return None,
    };
    Some(reply)
}

/// Perform the side effects of one dialog transition
pub async fn run_dialog_effect<M>(
    messenger: &M,
    forwarder: &AdminForwarder,
    message: &IncomingMessage,
    effect: DialogEffect,
) -> Result<()>
where
    M: Messenger + ?Sized,
{
    match effect {
        DialogEffect::Submit { message_type, body } => {
            let submission = Submission {
                message_type,
                sender: message.sender.clone(),
                body,
            };
            let outcome = forwarder
                .forward(messenger, message.chat_id, submission)
                .await?;
            info!(
                user_id = %message.sender.id,
                message_type = %message_type,
                outcome = ?outcome,
                "Submission handled"
            );
        }
        other => {
            if let Some((text, keyboard)) = reply_for(&other) {
                messenger
                    .send_text(message.chat_id.into(), text, keyboard)
                    .await?;
            }
        }
    }

    Ok(())
}
