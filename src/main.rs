use clap::Parser;
use log::LevelFilter;
use rawline::range::DEFAULT_START_LINE;
use rawline::{inspect, Encoding, InspectConfig, InspectError, LineRange};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rawline")]
#[command(version, about = "Show the exact characters on a range of lines in a text file")]
struct Args {
    /// Text file to inspect
    file: PathBuf,

    /// Encoding used to decode the file (utf-8, utf-8-sig, ascii, latin-1)
    #[arg(short, long, default_value = "utf-8")]
    encoding: Encoding,

    /// First line to show, 1-based
    #[arg(short, long, default_value_t = DEFAULT_START_LINE, conflicts_with = "lines")]
    start: usize,

    /// Last line to show, 1-based and inclusive [default: START + 5]
    #[arg(short = 'E', long, conflicts_with = "lines")]
    end: Option<usize>,

    /// Range shorthand: N, START-END or START:END
    #[arg(short, long, value_name = "START-END")]
    lines: Option<LineRange>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> rawline::Result<()> {
    let range = match (args.lines, args.end) {
        (Some(range), _) => range,
        (None, Some(end)) => LineRange::new(args.start, end)?,
        (None, None) => LineRange::starting_at(args.start)?,
    };

    let config = InspectConfig::new(&args.file)
        .with_encoding(args.encoding)
        .with_range(range);
    log::debug!("inspecting {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    inspect(&config, &mut out)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(InspectError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("output closed early");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rawline: {}", e);
            ExitCode::FAILURE
        }
    }
}
