use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use services::{ContinuousDrill, FiniteSession, Terminal};
use storage::DataPaths;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use verbs_core::DrillConfig;
use verbs_core::catalog;

#[derive(Debug)]
enum ArgsError {
    UnknownSubcommand(String),
    UnexpectedArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownSubcommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::UnexpectedArg(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  irregular-verbs [session]   # finite session with repeat rounds (default)");
    eprintln!("  irregular-verbs endless     # endless drill, ':stats' and ':reset' at the first prompt");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  IRREGULAR_VERBS_DIR             data directory (default: home directory)");
    eprintln!("  IRREGULAR_VERBS_SAMPLE_SIZE     verbs per session (default: 20)");
    eprintln!("  IRREGULAR_VERBS_MAX_ROUNDS      repeat rounds per session (default: 3)");
    eprintln!("  IRREGULAR_VERBS_WEIGHTED        bias endless picks toward mistakes (default: true)");
    eprintln!("  IRREGULAR_VERBS_CASE_INSENSITIVE  ignore letter case (default: true)");
    eprintln!("  IRREGULAR_VERBS_HINTS           show allowed variants after a miss (default: true)");
    eprintln!("  RUST_LOG                        log filter, logs go to stderr (default: warn)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Session,
    Endless,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "session" => Some(Self::Session),
            "endless" => Some(Self::Endless),
            _ => None,
        }
    }
}

/// Parsed command line; `None` means usage was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Command>, ArgsError> {
    let mut args = args.into_iter();
    let cmd = match args.next() {
        None => Command::Session,
        Some(first) if first == "--help" || first == "-h" => return Ok(None),
        Some(first) => {
            Command::from_arg(&first).ok_or(ArgsError::UnknownSubcommand(first))?
        }
    };

    match args.next() {
        None => Ok(Some(cmd)),
        Some(arg) if arg == "--help" || arg == "-h" => Ok(None),
        Some(arg) => Err(ArgsError::UnexpectedArg(arg)),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_value<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warn!(name, value = %raw, "ignoring invalid environment value");
    }
    parsed
}

fn env_number<T: FromStr>(name: &str) -> Option<T> {
    env_value(name, |raw| raw.trim().parse().ok())
}

fn config_from_env() -> DrillConfig {
    let mut config = DrillConfig::default();

    if let Some(size) = env_number::<usize>("IRREGULAR_VERBS_SAMPLE_SIZE") {
        match config.clone().with_sample_size(size) {
            Ok(updated) => config = updated,
            Err(err) => warn!(error = %err, "ignoring IRREGULAR_VERBS_SAMPLE_SIZE"),
        }
    }
    if let Some(rounds) = env_number::<u32>("IRREGULAR_VERBS_MAX_ROUNDS") {
        config = config.with_max_repeat_rounds(rounds);
    }
    if let Some(on) = env_value("IRREGULAR_VERBS_WEIGHTED", parse_flag) {
        config = config.with_weighted(on);
    }
    if let Some(on) = env_value("IRREGULAR_VERBS_CASE_INSENSITIVE", parse_flag) {
        config = config.with_case_insensitive(on);
    }
    if let Some(on) = env_value("IRREGULAR_VERBS_HINTS", parse_flag) {
        config = config.with_hints(on);
    }
    config
}

fn data_paths() -> Result<DataPaths, storage::StorageError> {
    match std::env::var_os("IRREGULAR_VERBS_DIR") {
        Some(dir) if !dir.is_empty() => Ok(DataPaths::under(&PathBuf::from(dir))),
        _ => DataPaths::home(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cmd = match parse_args(std::env::args().skip(1)) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    let verbs = catalog::verbs();
    catalog::validate(verbs)?;
    let config = config_from_env();
    let paths = data_paths()?;
    info!(?cmd, dir = %paths.log_dir().display(), "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut term = Terminal::new(stdin.lock(), stdout.lock());
    let mut rng = rand::rng();

    match cmd {
        Command::Session => {
            let mut session = FiniteSession::new(verbs, config)?;
            session.run_persisted(&mut term, &paths, &mut rng)?;
        }
        Command::Endless => {
            let drill = ContinuousDrill::new(verbs, config, paths.state_file())?;
            drill.run_persisted(&mut term, &mut rng)?;
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn session_is_the_default_command() {
        assert_eq!(parse_args(args(&[])).unwrap(), Some(Command::Session));
        assert_eq!(parse_args(args(&["endless"])).unwrap(), Some(Command::Endless));
    }

    #[test]
    fn help_and_bad_args() {
        assert_eq!(parse_args(args(&["-h"])).unwrap(), None);
        assert_eq!(parse_args(args(&["session", "--help"])).unwrap(), None);
        assert!(matches!(
            parse_args(args(&["lesson"])),
            Err(ArgsError::UnknownSubcommand(cmd)) if cmd == "lesson"
        ));
        assert!(matches!(
            parse_args(args(&["session", "--db"])),
            Err(ArgsError::UnexpectedArg(_))
        ));
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
