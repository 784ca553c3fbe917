pub mod event;
pub mod house;
pub mod match_record;
pub mod player;

pub use event::{Event, EventCategory};
pub use house::House;
pub use match_record::{MatchRecord, NewMatch, RoundKind};
pub use player::Player;
