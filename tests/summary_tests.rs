use chrono::{NaiveDate, Utc};
use matchday_server::db::models::{MatchResponse, MatchStatus, Player, Role};
use matchday_server::selection::{
    build_sheet, fixture_sort_key, not_responded, roster_responses, tally, Availability,
    ResponseState, SheetMode, TransitionAction,
};
use uuid::Uuid;

fn state(availability: Option<Availability>, selected: bool) -> ResponseState {
    ResponseState {
        availability,
        selected,
    }
}

#[test]
fn tally_reports_disjoint_counts() {
    let states = [
        state(Some(Availability::Yes), true), // selected only
        state(Some(Availability::Yes), false),
        state(Some(Availability::Maybe), false),
        state(Some(Availability::No), false),
        state(None, true), // selected only
    ];

    let counts = tally(&states);
    assert_eq!(counts.selected, 2);
    assert_eq!(counts.available, 1);
    assert_eq!(counts.maybe, 1);
}

#[test]
fn fixtures_order_by_status_rank_then_date() {
    let d = |day| NaiveDate::from_ymd_opt(2026, 5, day).unwrap();
    let mut fixtures = vec![
        (MatchStatus::Cancelled, d(1)),
        (MatchStatus::Completed, d(2)),
        (MatchStatus::Scheduled, d(20)),
        (MatchStatus::Scheduled, d(3)),
        (MatchStatus::Completed, d(1)),
    ];

    fixtures.sort_by_key(|(status, date)| fixture_sort_key(*status, *date));
    assert_eq!(
        fixtures,
        vec![
            (MatchStatus::Scheduled, d(3)),
            (MatchStatus::Scheduled, d(20)),
            (MatchStatus::Completed, d(1)),
            (MatchStatus::Completed, d(2)),
            (MatchStatus::Cancelled, d(1)),
        ]
    );
}

fn player(club: Uuid, name: &str, active: bool) -> Player {
    Player {
        id: Uuid::new_v4(),
        club_id: club,
        account_id: None,
        name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        role: Role::Player,
        is_active: active,
        created_at: Utc::now(),
    }
}

fn response(match_id: Uuid, player_id: Uuid, s: ResponseState) -> MatchResponse {
    MatchResponse {
        match_id,
        player_id,
        availability: s.availability,
        selected: s.selected,
        updated_at: Utc::now(),
    }
}

// The full write-then-project round trip: answer, select, answer again,
// then read every view of the match.
#[test]
fn engine_round_trip_across_all_views() {
    let club = Uuid::new_v4();
    let match_id = Uuid::new_v4();
    let p1 = player(club, "Pat", true);
    let p2 = player(club, "Quinn", true);
    let p3 = player(club, "Riley", false);

    // Pat answers yes, then is added to the team.
    let mut pat = ResponseState::default();
    TransitionAction::SetAvailable.apply(&mut pat);
    TransitionAction::AddToTeam.apply(&mut pat);

    // Quinn answers no.
    let mut quinn = ResponseState::default();
    TransitionAction::SetUnavailable.apply(&mut quinn);

    let responses = vec![
        response(match_id, p1.id, pat),
        response(match_id, p2.id, quinn),
    ];
    let roster = roster_responses(&[p1.clone(), p2.clone(), p3], &responses);

    let sheet = build_sheet(SheetMode::TeamSelection, &roster);
    assert_eq!(sheet.selected.len(), 1);
    assert_eq!(sheet.selected[0].name, "Pat");
    assert_eq!(sheet.unavailable.len(), 1);
    assert_eq!(sheet.unavailable[0].name, "Quinn");
    assert!(sheet.awaiting.is_empty()); // Riley is inactive, never listed
    assert!(sheet.available.is_empty());
    assert!(sheet.maybe.is_empty());

    // Pat answered yes, so selecting them raises no warning.
    assert!(sheet.unavailable_selected.is_empty());
    assert_eq!(sheet.total_available, 1);

    // Everyone active has a record by now.
    assert!(not_responded(&roster).is_empty());

    let states: Vec<ResponseState> = [pat, quinn].into();
    let counts = tally(&states);
    assert_eq!(counts.selected, 1);
    assert_eq!(counts.available, 0);
    assert_eq!(counts.maybe, 0);
}
