pub mod bracket;
pub mod event;
pub mod house;
pub mod player;
