use std::path::{Path, PathBuf};

use crate::encoding::Encoding;
use crate::range::LineRange;

/// Everything one inspection run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    pub path: PathBuf,
    pub encoding: Encoding,
    pub range: LineRange,
}

impl InspectConfig {
    /// UTF-8, lines 569-574.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: Encoding::default(),
            range: LineRange::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_range(mut self, range: LineRange) -> Self {
        self.range = range;
        self
    }
}
