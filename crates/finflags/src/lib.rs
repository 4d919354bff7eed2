//! `finflags` - Financial Analysis Model client
//!
//! This library provides the upload page: selecting a file, sending it to the
//! analysis endpoint, and rendering the three rule flags that come back.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod route;
pub mod session;
pub mod upload;
pub mod view;

pub use analysis::{AnalysisResult, FlagValue, Flags};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use route::{Route, RouteEvent};
pub use session::{Navigation, PageSnapshot, Session, SubmitOutcome};
pub use upload::{HttpUploader, SelectedFile, Uploader};
