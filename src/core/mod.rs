pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{BirthDetailsRequest, Reading};
pub use crate::domain::ports::{HoroscopeSource, Interpreter};
pub use crate::utils::error::Result;
pub use pipeline::{CombineMode, FetchMode, HoroscopePipeline};
