//! Print a window of lines from a text file with every invisible character
//! spelled out.

pub mod config;
pub mod encoding;
pub mod error;
pub mod file_loader;
pub mod range;
pub mod report;
pub mod repr;

pub use config::InspectConfig;
pub use encoding::Encoding;
pub use error::{InspectError, Result};
pub use range::LineRange;
pub use report::{inspect, FormattedLineReport, Inspector};
