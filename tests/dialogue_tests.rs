use crabmine_bot::catalog::Role;
use crabmine_bot::dialogue::{DialogInput, DialogState, EntryPoint, MessageType, Session};

/// A chosen role is kept until the application text arrives
#[test]
fn test_application_state_carries_the_role() {
    let mut session = Session::new();
    session.apply(DialogInput::Entry(EntryPoint::Application));
    session.apply(DialogInput::Text(Role::Helper.label()));
    session.apply(DialogInput::NonText);

    assert_eq!(
        session.state(),
        &DialogState::AwaitingText(MessageType::Application(Role::Helper))
    );
}

/// Test default state
#[test]
fn test_default_state_is_idle() {
    assert_eq!(DialogState::default(), DialogState::Idle);
    assert!(!Session::default().is_active());
}

/// Every role reachable from the role keyboard leads to text collection
#[test]
fn test_each_role_awaits_application_text() {
    for role in Role::ALL {
        let mut session = Session::new();
        session.apply(DialogInput::Entry(EntryPoint::Application));
        session.apply(DialogInput::Text(role.label()));

        assert_eq!(
            session.state(),
            &DialogState::AwaitingText(MessageType::Application(role))
        );
        assert_eq!(
            session.pending_message_type(),
            Some(format!("application: {}", role.label()))
        );
    }
}

/// Message type labels used in admin notifications
#[test]
fn test_message_type_labels() {
    assert_eq!(MessageType::Idea.to_string(), "idea");
    assert_eq!(MessageType::Complaint.to_string(), "complaint");
    assert_eq!(
        MessageType::Application(Role::TikTok).to_string(),
        "application: TikTok"
    );
}
