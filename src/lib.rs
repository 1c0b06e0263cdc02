pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod summarize;
pub mod transcribe;
pub mod translate;

pub use config::Config;
pub use error::{Result, VaaniError};
pub use pipeline::{MediaInput, MediaPipeline, ResultRecord};
