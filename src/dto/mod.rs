pub mod leaderboard;
pub mod player_request;
pub mod result_request;
