use clap::Parser;
use clap_complete::engine::{ArgValueCompleter, PathCompleter};

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None,
    override_usage = "\n    envwizard [OPTIONS]\n    envwizard [OPTIONS] <PATHS ...>")]
pub struct Args {
    /********************/
    /* Flags and settings */
    /********************/
    /// Set the log level to one of trace, debug, info, warn, or error.
    /// `-v` is shorthand for enabling verbose (trace) logging.
    #[arg(short = 'v',
        long,
        default_missing_value = "trace",
        num_args = 0..=1,
        require_equals = true,
        value_parser = parse_log_level
    )]
    pub log_level: Option<log::LevelFilter>,

    /// Python interpreter used to create each virtual environment.
    /// Defaults to `python3` (`python` on Windows).
    #[arg(long, value_hint = clap::ValueHint::CommandName)]
    pub python: Option<String>,

    /// Name of the dependency manifest inside each path. Defaults to `requirements.txt`
    #[arg(long)]
    pub manifest: Option<String>,

    /// Name of the virtual environment directory inside each path. Defaults to `venv`
    #[arg(long)]
    pub env_dir: Option<String>,

    /// Milliseconds to wait before asking again after a non-positive count
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Do not show a spinner while environments are being created
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_spinner: bool,

    /// Do not load config files.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_config: bool,

    /// Print the final summary as a JSON blob instead of human readable output.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Exit with a non-zero status if any environment failed.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub strict: bool,

    /// Print the resolved configuration and exit.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub show_config: bool,

    /*********/
    /* Paths */
    /*********/
    /// Directories to set up. Each one needs a requirements.txt. When no paths are given
    /// you will be asked for them interactively.
    #[arg(
        value_name = "PATHS",
        num_args = 0..,
        add = ArgValueCompleter::new(PathCompleter::dir()),
        help_heading = "Paths",
    )]
    pub paths: Vec<String>,
}

fn parse_log_level(s: &str) -> Result<log::LevelFilter, String> {
    s.parse::<log::LevelFilter>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["envwizard"]).unwrap();
        assert!(args.paths.is_empty());
        assert!(args.log_level.is_none());
        assert!(!args.json && !args.strict && !args.no_config);
    }

    #[test]
    fn test_parse_paths_and_flags() {
        let args = Args::try_parse_from([
            "envwizard",
            "-v",
            "--python=/usr/bin/python3.12",
            "--json",
            "a",
            "b",
        ])
        .unwrap();
        assert_eq!(args.log_level, Some(log::LevelFilter::Trace));
        assert_eq!(args.python.as_deref(), Some("/usr/bin/python3.12"));
        assert!(args.json);
        assert_eq!(args.paths, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_bad_log_level() {
        assert!(
            Args::try_parse_from(["envwizard", "--log-level=loud"]).is_err()
        );
    }
}
