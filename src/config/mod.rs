pub mod settings;
pub mod tees;

pub use settings::{
    AppConfig, EntrySettings, HandicapSettings, MemoSettings, RankingSettings, database_path,
};
pub use tees::TeeSettings;
