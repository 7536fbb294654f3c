use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{InspectError, Result};

pub const DEFAULT_START_LINE: usize = 569;
pub const DEFAULT_END_LINE: usize = 574;

/// Inclusive range of 1-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 || end == 0 {
            return Err(InspectError::InvalidRange {
                start,
                end,
                reason: "line numbers must be >= 1",
            });
        }
        if start > end {
            return Err(InspectError::InvalidRange {
                start,
                end,
                reason: "start is after end",
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Range from `start` spanning as many lines as the default window.
    pub fn starting_at(start: usize) -> Result<Self> {
        Self::new(start, start.saturating_add(DEFAULT_END_LINE - DEFAULT_START_LINE))
    }

    /// 0-based half-open offsets into a sequence of `line_count` lines.
    ///
    /// Lines past the end of the sequence are dropped; a range starting
    /// beyond it yields an empty slice positioned at `line_count`.
    pub fn offsets(&self, line_count: usize) -> Range<usize> {
        let first = (self.start - 1).min(line_count);
        let last = self.end.min(line_count);
        first..last
    }
}

impl Default for LineRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_LINE,
            end: DEFAULT_END_LINE,
        }
    }
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s*(?:[-:]\s*(\d+)\s*)?$").expect("range pattern is valid")
    })
}

/// Parses `N`, `START-END` or `START:END`.
impl FromStr for LineRange {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let caps = range_pattern()
            .captures(input)
            .ok_or_else(|| format!("invalid line range: {}", input.trim()))?;

        let parse = |s: &str| {
            s.parse::<usize>()
                .map_err(|_| format!("line number out of range: {}", s))
        };
        let start = parse(&caps[1])?;
        let end = match caps.get(2) {
            Some(m) => parse(m.as_str())?,
            None => start,
        };

        LineRange::new(start, end).map_err(|e| e.to_string())
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
