//! Dialogue module for the per-user conversation state machine.
//!
//! Transitions are synchronous: [`Session::apply`] mutates the session and
//! returns a [`DialogEffect`] describing what the bot must say, leaving all
//! network I/O to the router.

use std::fmt;
use std::time::{Duration, Instant};

use crate::catalog::{
    Role, CANCEL_LABEL, SUBMIT_APPLICATION_LABEL, WRITE_COMPLAINT_LABEL, WRITE_IDEA_LABEL,
};
use crate::localization::{t, t_args};

/// What kind of text is being collected from the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageType {
    Idea,
    Complaint,
    Application(Role),
}

impl MessageType {
    /// Localized name shown to users and admins
    pub fn display_name(&self) -> String {
        match self {
            MessageType::Idea => t("kind-idea"),
            MessageType::Complaint => t("kind-complaint"),
            MessageType::Application(role) => {
                t_args("kind-application-role", &[("role", role.label())])
            }
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Idea => write!(f, "idea"),
            MessageType::Complaint => write!(f, "complaint"),
            MessageType::Application(role) => write!(f, "application: {}", role.label()),
        }
    }
}

/// Represents the conversation state of one user
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Idle,
    ChoosingRole,
    AwaitingText(MessageType),
}

/// Menu labels that open a multi-step flow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    Idea,
    Complaint,
    Application,
}

impl EntryPoint {
    pub fn from_label(text: &str) -> Option<Self> {
        match text {
            WRITE_IDEA_LABEL => Some(EntryPoint::Idea),
            WRITE_COMPLAINT_LABEL => Some(EntryPoint::Complaint),
            SUBMIT_APPLICATION_LABEL => Some(EntryPoint::Application),
            _ => None,
        }
    }
}

/// Input already classified by the router
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogInput<'a> {
    Entry(EntryPoint),
    Text(&'a str),
    Cancel,
    Restart,
    /// A slash command other than cancel or restart
    OtherCommand,
    /// A message without text (sticker, photo, ...)
    NonText,
}

/// What the router has to do after a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogEffect {
    PromptIdea,
    PromptComplaint,
    /// Show the role keyboard
    PromptRole,
    /// Send the questionnaire for the chosen role
    ShowRoleTemplate(Role),
    RepromptRole,
    RepromptText(MessageType),
    Cancelled,
    MainMenu,
    /// Hand the collected text to the admin forwarder
    Submit { message_type: MessageType, body: String },
    /// Input reached an idle session; nothing to continue
    NotActive,
}

/// Per-user session
#[derive(Clone, Debug)]
pub struct Session {
    state: DialogState,
    last_activity: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: DialogState::Idle,
            last_activity: Instant::now(),
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != DialogState::Idle
    }

    /// Label of what is being collected; `Some` exactly when not idle
    pub fn pending_message_type(&self) -> Option<String> {
        match &self.state {
            DialogState::Idle => None,
            DialogState::ChoosingRole => Some("application".to_string()),
            DialogState::AwaitingText(message_type) => Some(message_type.to_string()),
        }
    }

    /// Drop back to idle. Clearing an idle session is a no-op.
    pub fn reset(&mut self) {
        self.state = DialogState::Idle;
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Whether the session sat untouched for longer than `timeout`
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_activity) > timeout
    }

    /// Run one transition.
    ///
    /// The cancel button label ("Отмена") cancels while a text is being
    /// collected too, instead of being submitted as that text.
    pub fn apply(&mut self, input: DialogInput<'_>) -> DialogEffect {
        self.last_activity = Instant::now();

        match (input, &self.state) {
            (DialogInput::Restart, _) => {
                self.reset();
                DialogEffect::MainMenu
            }
            (DialogInput::Cancel, _) => {
                self.reset();
                DialogEffect::Cancelled
            }
            // Entry points re-enter from any state
            (DialogInput::Entry(entry), _) => match entry {
                EntryPoint::Idea => {
                    self.state = DialogState::AwaitingText(MessageType::Idea);
                    DialogEffect::PromptIdea
                }
                EntryPoint::Complaint => {
                    self.state = DialogState::AwaitingText(MessageType::Complaint);
                    DialogEffect::PromptComplaint
                }
                EntryPoint::Application => {
                    self.state = DialogState::ChoosingRole;
                    DialogEffect::PromptRole
                }
            },
            (_, DialogState::Idle) => DialogEffect::NotActive,
            (DialogInput::Text(text), DialogState::ChoosingRole) => {
                if text == CANCEL_LABEL {
                    self.reset();
                    return DialogEffect::Cancelled;
                }
                match Role::from_label(text) {
                    Some(role) => {
                        self.state = DialogState::AwaitingText(MessageType::Application(role));
                        DialogEffect::ShowRoleTemplate(role)
                    }
                    None => DialogEffect::RepromptRole,
                }
            }
            (_, DialogState::ChoosingRole) => DialogEffect::RepromptRole,
            (DialogInput::Text(text), DialogState::AwaitingText(message_type)) => {
                let message_type = *message_type;
                self.reset();
                if text == CANCEL_LABEL {
                    return DialogEffect::Cancelled;
                }
                DialogEffect::Submit {
                    message_type,
                    body: text.to_string(),
                }
            }
            (_, DialogState::AwaitingText(message_type)) => {
                DialogEffect::RepromptText(*message_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(session: &Session) {
        assert_eq!(
            session.pending_message_type().is_some(),
            session.is_active(),
            "pending message type out of sync with {:?}",
            session.state()
        );
    }

    #[test]
    fn test_idea_flow() {
        let mut session = Session::new();
        let effect = session.apply(DialogInput::Entry(EntryPoint::Idea));
        assert_eq!(effect, DialogEffect::PromptIdea);
        assert_eq!(session.pending_message_type().as_deref(), Some("idea"));
        assert_invariant(&session);

        let effect = session.apply(DialogInput::Text("Add a new game mode"));
        assert_eq!(
            effect,
            DialogEffect::Submit {
                message_type: MessageType::Idea,
                body: "Add a new game mode".to_string(),
            }
        );
        assert_eq!(session.state(), &DialogState::Idle);
        assert_invariant(&session);
    }

    #[test]
    fn test_application_flow() {
        let mut session = Session::new();
        assert_eq!(
            session.apply(DialogInput::Entry(EntryPoint::Application)),
            DialogEffect::PromptRole
        );
        assert_eq!(session.state(), &DialogState::ChoosingRole);
        assert_invariant(&session);

        assert_eq!(
            session.apply(DialogInput::Text("YouTube")),
            DialogEffect::ShowRoleTemplate(Role::YouTube)
        );
        assert_eq!(
            session.pending_message_type().as_deref(),
            Some("application: YouTube")
        );
        assert_invariant(&session);
    }

    #[test]
    fn test_unknown_role_reprompts() {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Application));
        assert_eq!(session.apply(DialogInput::Text("Moderator")), DialogEffect::RepromptRole);
        assert_eq!(session.apply(DialogInput::OtherCommand), DialogEffect::RepromptRole);
        assert_eq!(session.apply(DialogInput::NonText), DialogEffect::RepromptRole);
        assert_eq!(session.state(), &DialogState::ChoosingRole);
        assert_invariant(&session);
    }

    #[test]
    fn test_commands_while_awaiting_text_reprompt() {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Complaint));
        assert_eq!(
            session.apply(DialogInput::OtherCommand),
            DialogEffect::RepromptText(MessageType::Complaint)
        );
        assert_eq!(
            session.state(),
            &DialogState::AwaitingText(MessageType::Complaint)
        );
        assert_invariant(&session);
    }

    #[test]
    fn test_cancel_label_while_awaiting_text() {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Idea));
        assert_eq!(session.apply(DialogInput::Text(CANCEL_LABEL)), DialogEffect::Cancelled);
        assert!(!session.is_active());
    }

    #[test]
    fn test_restart_and_cancel_from_every_state() {
        let setups: [&[DialogInput<'_>]; 4] = [
            &[],
            &[DialogInput::Entry(EntryPoint::Application)],
            &[DialogInput::Entry(EntryPoint::Idea)],
            &[
                DialogInput::Entry(EntryPoint::Application),
                DialogInput::Text("Helper"),
            ],
        ];

        for setup in setups {
            for (terminal, expected) in [
                (DialogInput::Restart, DialogEffect::MainMenu),
                (DialogInput::Cancel, DialogEffect::Cancelled),
            ] {
                let mut session = Session::new();
                for input in setup {
                    session.apply(*input);
                    assert_invariant(&session);
                }
                assert_eq!(session.apply(terminal), expected);
                assert_eq!(session.state(), &DialogState::Idle);
                assert_eq!(session.pending_message_type(), None);
            }
        }
    }

    #[test]
    fn test_double_cancel_is_noop() {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Idea));
        session.apply(DialogInput::Cancel);
        assert_eq!(session.apply(DialogInput::Cancel), DialogEffect::Cancelled);
        assert_eq!(session.state(), &DialogState::Idle);
    }

    #[test]
    fn test_reentry_switches_flow() {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Idea));
        session.apply(DialogInput::Entry(EntryPoint::Complaint));
        assert_eq!(session.pending_message_type().as_deref(), Some("complaint"));
    }

    #[test]
    fn test_idle_input_is_not_active() {
        let mut session = Session::new();
        assert_eq!(session.apply(DialogInput::Text("hello")), DialogEffect::NotActive);
        assert_invariant(&session);
    }

    #[test]
    fn test_expiry() {
        let session = Session::new();
        let later = session.last_activity() + Duration::from_secs(120);
        assert!(session.is_expired(later, Duration::from_secs(60)));
        assert!(!session.is_expired(later, Duration::from_secs(600)));
    }
}
