pub mod event;
pub mod house;
pub mod matches;
pub mod player;
