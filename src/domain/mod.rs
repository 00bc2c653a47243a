pub mod models;
pub mod snapshot;
pub mod source;

pub use models::{Event, Participant, Player, ScoreRecord};
pub use snapshot::LeagueSnapshot;
pub use source::LeagueSource;
