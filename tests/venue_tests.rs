use chrono::Utc;
use matchday_server::db::match_repo::resolved_venue;
use matchday_server::db::models::{Club, Opposition};
use uuid::Uuid;

fn club(ground: &str) -> Club {
    Club {
        id: Uuid::new_v4(),
        name: "Norton CC".to_string(),
        home_ground: ground.to_string(),
        default_fee_pence: 1_000,
        created_by: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

fn opposition(club_id: Uuid, ground: &str) -> Opposition {
    Opposition {
        id: Uuid::new_v4(),
        club_id,
        name: "Rovers".to_string(),
        home_ground: ground.to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn empty_venue_falls_back_to_home_ground() {
    let c = club("The Oval");
    let o = opposition(c.id, "The Park");
    assert_eq!(resolved_venue("", true, &c, &o), "The Oval");
}

#[test]
fn empty_venue_falls_back_to_opposition_ground_when_away() {
    let c = club("The Oval");
    let o = opposition(c.id, "The Park");
    assert_eq!(resolved_venue("", false, &c, &o), "The Park");
    assert_eq!(resolved_venue("   ", false, &c, &o), "The Park");
}

#[test]
fn supplied_venue_is_never_overwritten() {
    let c = club("The Oval");
    let o = opposition(c.id, "The Park");
    assert_eq!(resolved_venue("Neutral Lane", true, &c, &o), "Neutral Lane");
    assert_eq!(resolved_venue("Neutral Lane", false, &c, &o), "Neutral Lane");
}
