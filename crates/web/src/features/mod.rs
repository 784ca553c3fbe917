pub mod brackets;
pub mod events;
pub mod houses;
pub mod players;
