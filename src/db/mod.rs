pub mod club_repo;
pub mod match_repo;
pub mod models;
pub mod opposition_repo;
pub mod player_repo;
pub mod response_repo;
