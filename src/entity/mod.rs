pub mod players;

pub use players::Entity as Players;
