use matchday_server::selection::{Availability, ResponseState, TransitionAction};

const ALL_ACTIONS: [TransitionAction; 5] = [
    TransitionAction::SetAvailable,
    TransitionAction::SetMaybe,
    TransitionAction::SetUnavailable,
    TransitionAction::AddToTeam,
    TransitionAction::RemoveFromTeam,
];

#[test]
fn availability_actions_leave_selection_axis_alone() {
    let mut state = ResponseState {
        availability: None,
        selected: true,
    };

    TransitionAction::SetAvailable.apply(&mut state);
    assert_eq!(state.availability, Some(Availability::Yes));
    assert!(state.selected);

    TransitionAction::SetUnavailable.apply(&mut state);
    assert_eq!(state.availability, Some(Availability::No));
    // selected survives both writes: the axes are independent
    assert!(state.selected);
}

#[test]
fn team_actions_never_manufacture_an_availability() {
    let mut state = ResponseState::default();

    TransitionAction::AddToTeam.apply(&mut state);
    assert!(state.selected);
    assert_eq!(state.availability, None);

    TransitionAction::RemoveFromTeam.apply(&mut state);
    assert_eq!(state, ResponseState::default());
}

#[test]
fn team_actions_preserve_an_existing_answer() {
    let mut state = ResponseState {
        availability: Some(Availability::Maybe),
        selected: false,
    };

    TransitionAction::AddToTeam.apply(&mut state);
    assert_eq!(state.availability, Some(Availability::Maybe));
    assert!(state.selected);
}

#[test]
fn every_action_is_idempotent() {
    for action in ALL_ACTIONS {
        let mut once = ResponseState::default();
        action.apply(&mut once);

        let mut twice = ResponseState::default();
        action.apply(&mut twice);
        action.apply(&mut twice);

        assert_eq!(once, twice, "{action:?} must be idempotent");
    }
}
