use std::error::Error;
use std::path::{Path, PathBuf};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

pub const LOG_DIR_ENV: &str = "JSONQUERY_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "JSONQUERY_LOG_LEVEL";
pub const LOG_RETENTION_ENV: &str = "JSONQUERY_LOG_RETENTION";

/// Initializes the logging system from the default file `log4rs.yaml` in the working directory.
/// Prefer `configure_logging` for programmatic control.
pub fn init() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Initializes the logging system from a specific config file path.
pub fn init_path(path: &Path) -> Result<(), Box<dyn Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Configure logging globally for the process, writing a rolling `jsonquery.log`.
/// - dir: base directory for logs; if None, current directory.
/// - level: error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
///
/// If a logger is already installed the new configuration is dropped.
///
/// # Errors
/// Returns an error if the directory or the appender cannot be created.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    use log4rs::append::rolling_file::RollingFileAppender;
    use log4rs::append::rolling_file::policy::compound::{
        CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
    };
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let base = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&base)?;
    let keep = u32::try_from(retention.unwrap_or(7)).unwrap_or(u32::MAX);
    let lvl = parse_level(level.unwrap_or("info"));
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join("jsonquery.{}.log").display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join("jsonquery.log"), Box::new(policy))?;
    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(appender)))
        .build(Root::builder().appender("app").build(lvl))?;
    if log4rs::init_config(config).is_err() {
        log::debug!("logger already initialized; keeping existing configuration");
    }
    Ok(())
}

/// Configure logging from environment variables if present:
/// - JSONQUERY_LOG_DIR
/// - JSONQUERY_LOG_LEVEL
/// - JSONQUERY_LOG_RETENTION
///
/// # Errors
/// As [`configure_logging`].
pub fn configure_from_env() -> Result<(), Box<dyn Error>> {
    configure_from_lookup(|k| std::env::var(k).ok())
}

/// [`configure_from_env`] against an arbitrary variable lookup.
///
/// # Errors
/// As [`configure_logging`].
pub fn configure_from_lookup<F: Fn(&str) -> Option<String>>(
    lookup: F,
) -> Result<(), Box<dyn Error>> {
    let dir = lookup(LOG_DIR_ENV).map(PathBuf::from);
    let level = lookup(LOG_LEVEL_ENV);
    let retention = lookup(LOG_RETENTION_ENV).and_then(|s| s.parse::<usize>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention)
}

fn parse_level(level: &str) -> log::LevelFilter {
    use log::LevelFilter;
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
