use matchday_server::selection::{
    build_sheet, not_responded, Availability, ResponseState, RosterResponse, SheetMode,
};
use uuid::Uuid;

fn entry(name: &str, state: Option<ResponseState>) -> RosterResponse {
    RosterResponse {
        player_id: Uuid::new_v4(),
        name: name.to_string(),
        state,
    }
}

fn answered(availability: Option<Availability>, selected: bool) -> Option<ResponseState> {
    Some(ResponseState {
        availability,
        selected,
    })
}

#[test]
fn players_without_a_record_are_awaiting() {
    let roster = vec![entry("alice", None), entry("bob", None)];

    let sheet = build_sheet(SheetMode::TeamSelection, &roster);
    assert_eq!(sheet.awaiting.len(), 2);
    assert!(sheet.selected.is_empty());
    assert!(sheet.available.is_empty());

    let waiting = not_responded(&roster);
    assert_eq!(waiting.len(), 2);
}

#[test]
fn selection_trumps_availability_in_team_mode() {
    let roster = vec![
        entry("alice", answered(Some(Availability::No), true)),
        entry("bob", answered(Some(Availability::Yes), false)),
    ];

    let sheet = build_sheet(SheetMode::TeamSelection, &roster);
    assert_eq!(sheet.selected.len(), 1);
    assert_eq!(sheet.selected[0].name, "alice");
    assert!(sheet.unavailable.is_empty()); // alice left her availability bucket
    assert_eq!(sheet.available.len(), 1);

    // and the inconsistency is surfaced, not corrected
    assert_eq!(sheet.unavailable_selected.len(), 1);
    assert_eq!(sheet.unavailable_selected[0].name, "alice");
    assert_eq!(
        sheet.unavailable_selected[0].availability,
        Some(Availability::No)
    );
}

#[test]
fn bulk_mode_keeps_selected_players_in_their_availability_bucket() {
    let roster = vec![
        entry("alice", answered(Some(Availability::Yes), true)),
        entry("bob", answered(None, true)),
    ];

    let sheet = build_sheet(SheetMode::BulkAvailability, &roster);
    assert!(sheet.selected.is_empty());
    assert_eq!(sheet.available.len(), 1);
    assert!(sheet.available[0].selected);
    assert_eq!(sheet.awaiting.len(), 1);
    assert!(sheet.awaiting[0].selected);

    // bob is selected without an answer: warned in this mode too
    assert_eq!(sheet.unavailable_selected.len(), 1);
    assert_eq!(sheet.unavailable_selected[0].name, "bob");
}

#[test]
fn selected_bucket_orders_by_availability_rank_then_name() {
    let roster = vec![
        entry("zoe", answered(Some(Availability::Yes), true)),
        entry("carl", answered(Some(Availability::No), true)),
        entry("adam", answered(None, true)),
        entry("Ben", answered(Some(Availability::Maybe), true)),
    ];

    let sheet = build_sheet(SheetMode::TeamSelection, &roster);
    let order: Vec<&str> = sheet.selected.iter().map(|e| e.name.as_str()).collect();
    // yes < maybe < no-answer < no
    assert_eq!(order, ["zoe", "Ben", "adam", "carl"]);
}

#[test]
fn buckets_sort_by_name_case_insensitively() {
    let roster = vec![
        entry("carol", None),
        entry("Adam", None),
        entry("bella", None),
    ];

    let sheet = build_sheet(SheetMode::BulkAvailability, &roster);
    let order: Vec<&str> = sheet.awaiting.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(order, ["Adam", "bella", "carol"]);
}

#[test]
fn total_available_includes_selected_players_who_answered_yes() {
    let roster = vec![
        entry("a", answered(Some(Availability::Yes), false)),
        entry("b", answered(Some(Availability::Yes), false)),
        entry("c", answered(Some(Availability::Yes), false)),
        entry("d", answered(Some(Availability::Yes), true)),
        entry("e", answered(Some(Availability::Maybe), true)),
    ];

    let sheet = build_sheet(SheetMode::TeamSelection, &roster);
    assert_eq!(sheet.available.len(), 3);
    assert_eq!(sheet.selected.len(), 2);
    assert_eq!(sheet.total_available, 4);
}
