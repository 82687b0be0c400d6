pub mod media_service;
pub mod orchestrator;
pub mod seed;
pub mod transport;

pub use media_service::{HttpMediaService, IndexPicker, MediaService, ThreadRngPicker};
pub use orchestrator::{EmptyEpisodePolicy, Orchestrator, Status, ViewState};
pub use seed::{Seed, SeedError};
pub use transport::JsonTransport;
