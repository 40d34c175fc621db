pub mod config;
pub mod error;
pub mod logging;

pub mod fetcher;
pub mod page;
pub mod pipeline;
pub mod prompt;
pub mod scanner;
pub mod sequencer;

pub use error::{DownloadFailure, PuzzleError};
