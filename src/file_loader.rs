use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::encoding::Encoding;
use crate::error::{InspectError, Result};

enum Contents {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// Raw bytes of a text resource. Regular files are memory-mapped; pipes,
/// character devices and procfs entries report no useful length and are
/// read to the end instead. The file handle is closed once the bytes are
/// available and any mapping is released on drop.
pub struct SourceFile {
    path: PathBuf,
    contents: Contents,
}

impl SourceFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| InspectError::from_open(path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| InspectError::from_open(path, e))?;

        if metadata.is_dir() {
            return Err(InspectError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("is a directory"),
            });
        }

        // Zero-length regular files are read too: mapping them fails on some platforms
        let contents = if metadata.is_file() && metadata.len() > 0 {
            let mmap = unsafe { Mmap::map(&file).map_err(|e| InspectError::from_open(path, e))? };
            log::debug!("mapped {} ({} bytes)", path.display(), mmap.len());
            Contents::Mapped(mmap)
        } else {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| InspectError::from_open(path, e))?;
            log::debug!("read {} ({} bytes)", path.display(), buf.len());
            Contents::Owned(buf)
        };

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.contents {
            Contents::Mapped(mmap) => &mmap[..],
            Contents::Owned(buf) => &buf[..],
        }
    }

    /// Decode the whole file and split it into lines.
    pub fn decode(&self, encoding: Encoding) -> Result<LineSequence> {
        let bytes = self.bytes();
        let text = encoding.decode(bytes).map_err(|failure| {
            let line = 1 + bytes[..failure.offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            InspectError::Decode {
                path: self.path.clone(),
                encoding: encoding.name(),
                offset: failure.offset,
                line,
            }
        })?;

        let lines = LineSequence::new(text.into_owned());
        log::debug!("{}: {} lines", self.path.display(), lines.line_count());
        Ok(lines)
    }
}

/// Decoded text indexed by line. Every line keeps its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence {
    text: String,
    line_offsets: Vec<usize>,
}

impl LineSequence {
    pub fn new(text: String) -> Self {
        let mut sequence = Self {
            text,
            line_offsets: Vec::new(),
        };
        sequence.build_line_index();
        sequence
    }

    fn build_line_index(&mut self) {
        if self.text.is_empty() {
            return;
        }

        self.line_offsets.push(0);
        let data = self.text.as_bytes();

        for (i, &byte) in data.iter().enumerate() {
            if byte == b'\n' {
                let next_line_start = i + 1;
                if next_line_start < data.len() {
                    self.line_offsets.push(next_line_start);
                }
            }
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Line by 0-based number, terminator included.
    pub fn get_line(&self, line_num: usize) -> Option<&str> {
        let start = *self.line_offsets.get(line_num)?;
        let end = self
            .line_offsets
            .get(line_num + 1)
            .copied()
            .unwrap_or(self.text.len());

        // offsets sit just after '\n', always a char boundary
        Some(&self.text[start..end])
    }

    /// Lines in `range` (0-based, half-open) paired with their 0-based numbers.
    pub fn get_lines(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &str)> + '_ {
        let end = range.end.min(self.line_count());
        let start = range.start.min(end);
        (start..end).filter_map(move |i| self.get_line(i).map(|line| (i, line)))
    }
}
