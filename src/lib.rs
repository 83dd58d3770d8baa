pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{AstrologyApiService, GroqAiService};
pub use config::AppConfig;
pub use self::core::{
    engine::ReadingEngine, BirthDetailsRequest, CombineMode, FetchMode, HoroscopePipeline,
    Reading,
};
pub use utils::error::{HoroscopeError, Result};
