mod app;
mod help;
mod jumpto;
use crate::app::{App, DateSet};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use signcal::{CalendarDate, DateRange, DisplayOptions, MonthGridBuilder};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    month: Option<CalendarDate>,
    signed: DateSet,
    resign: DateSet,
    range: Option<DateRange>,
    display: DisplayOptions,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("signed") => {
                    opts.signed.extend(parse_dates(&parser.value()?.string()?)?);
                }
                Arg::Short('r') | Arg::Long("resign") => {
                    opts.resign.extend(parse_dates(&parser.value()?.string()?)?);
                }
                Arg::Long("range") => opts.range = Some(parser.value()?.parse()?),
                Arg::Short('t') | Arg::Long("show-today") => opts.display.show_today = true,
                Arg::Long("marker") => opts.display.marker = parse_marker(parser.value()?.string()?)?,
                Arg::Long("highlight-color") => {
                    opts.display.highlight_color = parser.value()?.parse()?;
                }
                Arg::Long("marker-color") => opts.display.marker_color = parser.value()?.parse()?,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.month.is_none() => {
                    let value = value.string()?;
                    match CalendarDate::parse_month(&value) {
                        Ok(d) => opts.month = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                let today = CalendarDate::from(
                    OffsetDateTime::now_local().context("failed to determine local date")?,
                );
                let start = opts.month.unwrap_or(today);
                log::info!(
                    "Starting at {start} with {} signed and {} pending dates",
                    opts.signed.len(),
                    opts.resign.len()
                );
                let builder = MonthGridBuilder::new(opts.signed, opts.resign).date_range(opts.range);
                let mut selected = Vec::new();
                let app = App::new(builder, opts.display, today, start, |date| {
                    selected.push(date);
                })
                .context("cannot display the requested month")?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })?;
                for date in selected {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: signcal [OPTIONS] [YYYY-MM[-DD]]");
                println!();
                println!("Terminal month calendar marking signed and pending re-sign dates");
                println!();
                println!("Selected dates are printed on exit, one per line.");
                println!();
                println!("Options:");
                println!("  -s, --signed DATES         Comma-separated YYYY-MM-DD dates to highlight");
                println!("  -r, --resign DATES         Comma-separated dates to mark as pending re-sign");
                println!("      --range BEGIN..END     Dim dates outside this inclusive range");
                println!("  -t, --show-today           Bracket today's date");
                println!("      --marker CHAR          Glyph drawn beside pending re-sign dates");
                println!("      --highlight-color COLOR");
                println!("                             Background of signed & pending dates");
                println!("      --marker-color COLOR   Color of the marker glyph");
                println!("      --log-file PATH        Write logs to PATH");
                println!("  -h, --help                 Display this help message and exit");
                println!("  -V, --version              Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_dates(value: &str) -> Result<Vec<CalendarDate>, lexopt::Error> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<CalendarDate>()
                .map_err(|e| lexopt::Error::ParsingFailed {
                    value: s.to_owned(),
                    error: Box::new(e),
                })
        })
        .collect()
}

fn parse_marker(value: String) -> Result<char, lexopt::Error> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(lexopt::Error::ParsingFailed {
            value,
            error: "expected a single character".into(),
        }),
    }
}

// The terminal belongs to the UI, so logs only go to a file
fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_full_args() {
        let cmd = parse(&[
            "--signed",
            "2024-02-10,2024-02-11",
            "-s",
            "2024-02-12",
            "-r",
            "2024-02-15",
            "--range",
            "2024-02-05..2024-02-20",
            "--show-today",
            "--marker",
            "补",
            "--highlight-color",
            "green",
            "--marker-color",
            "#ff0000",
            "2024-02",
        ])
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected Command::Run, got {cmd:?}");
        };
        assert_eq!(opts.month, Some(CalendarDate::from(date!(2024 - 02 - 01))));
        assert_eq!(
            opts.signed,
            DateSet::from([
                CalendarDate::from(date!(2024 - 02 - 10)),
                CalendarDate::from(date!(2024 - 02 - 11)),
                CalendarDate::from(date!(2024 - 02 - 12)),
            ])
        );
        assert_eq!(
            opts.resign,
            DateSet::from([CalendarDate::from(date!(2024 - 02 - 15))])
        );
        assert_eq!(
            opts.range,
            Some(DateRange::new(
                CalendarDate::from(date!(2024 - 02 - 05)),
                CalendarDate::from(date!(2024 - 02 - 20)),
            ))
        );
        assert_eq!(
            opts.display,
            DisplayOptions {
                show_today: true,
                marker: '补',
                highlight_color: Color::Green,
                marker_color: Color::Rgb(0xff, 0, 0),
            }
        );
        assert_eq!(opts.log_file, None);
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["-s", "2024-02-10", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            parse(&["--signed", "2024-02-30"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["2024-13"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_bad_marker() {
        assert!(matches!(
            parse(&["--marker", "ab"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_second_positional() {
        assert!(matches!(
            parse(&["2024-02", "2024-03"]),
            Err(lexopt::Error::UnexpectedArgument(_))
        ));
    }
}
