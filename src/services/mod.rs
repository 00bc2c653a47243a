pub mod engine;
pub mod loading;
pub mod server;

pub use engine::{EventResults, HandicapService, PlayerProfile};
pub use loading::LoadService;
pub use server::ServerService;
