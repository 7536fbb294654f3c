use std::fmt;
use std::io::{self, Write};

use crate::config::InspectConfig;
use crate::error::Result;
use crate::file_loader::{LineSequence, SourceFile};
use crate::range::LineRange;
use crate::repr;

/// What gets printed for one selected line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLineReport {
    /// 1-based
    pub line_number: usize,
    pub raw: String,
    pub visible: String,
}

impl FormattedLineReport {
    pub fn new(line_number: usize, line: &str) -> Self {
        Self {
            line_number,
            raw: repr::raw(line),
            visible: repr::visible(line).to_string(),
        }
    }
}

/// Renders the block followed by its blank separator line.
impl fmt::Display for FormattedLineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line {}:", self.line_number)?;
        writeln!(f, "  Raw: {}", self.raw)?;
        writeln!(f, "  Visible: {}", self.visible)?;
        writeln!(f)
    }
}

/// A decoded file plus the range to report on.
///
/// The source file is released as soon as the text is decoded, so an
/// `Inspector` holds no OS resources.
pub struct Inspector {
    lines: LineSequence,
    range: LineRange,
}

impl Inspector {
    pub fn open(config: &InspectConfig) -> Result<Self> {
        let lines = {
            let file = SourceFile::open(&config.path)?;
            file.decode(config.encoding)?
        };

        let inspector = Self::from_lines(lines, config.range);
        inspector.warn_if_truncated(config);
        Ok(inspector)
    }

    pub fn from_lines(lines: LineSequence, range: LineRange) -> Self {
        Self { lines, range }
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Reports for the selected lines in file order.
    pub fn reports(&self) -> impl Iterator<Item = FormattedLineReport> + '_ {
        self.lines
            .get_lines(self.range.offsets(self.lines.line_count()))
            .map(|(i, line)| FormattedLineReport::new(i + 1, line))
    }

    fn warn_if_truncated(&self, config: &InspectConfig) {
        let total = self.line_count();
        if self.range.start() > total {
            log::warn!(
                "{} has {} lines; nothing to show for lines {}",
                config.path.display(),
                total,
                self.range
            );
        } else if self.range.end() > total {
            log::warn!(
                "{} has {} lines; showing lines {}-{} of requested {}",
                config.path.display(),
                total,
                self.range.start(),
                total,
                self.range
            );
        }
    }
}

/// Write every report to `out`, returning how many were written.
///
/// Each block goes out in a single write; blocks already written stay
/// written if a later write fails.
pub fn write_reports<W, I>(out: &mut W, reports: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = FormattedLineReport>,
{
    let mut written = 0;
    for report in reports {
        out.write_all(report.to_string().as_bytes())?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Open, decode and print the configured range of `config.path`.
pub fn inspect<W: Write>(config: &InspectConfig, out: &mut W) -> Result<usize> {
    let inspector = Inspector::open(config)?;
    let written = write_reports(out, inspector.reports())?;
    log::info!(
        "wrote {} lines from {} for requested lines {}",
        written,
        config.path.display(),
        config.range
    );
    Ok(written)
}
