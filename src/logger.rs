use colored::{Color, ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::sync::Mutex;

struct LoggerState {
    level: LevelFilter,
    output: Box<dyn Write + Send>,
    deferred: Vec<(Level, ColoredString)>,
    defer_output: bool,
}

/* Log lines are held back until the configuration has been resolved, since
 * the final log level may come from a config file or environment variable
 * that we have not read yet when logging is first set up. */
pub struct WizardLogger {
    state: Mutex<LoggerState>,
}

impl WizardLogger {
    pub fn new(level: LevelFilter) -> &'static Self {
        Box::leak(Box::new(Self {
            state: Mutex::new(LoggerState {
                level,
                output: Box::new(io::stderr()),
                deferred: Vec::new(),
                defer_output: true,
            }),
        }))
    }

    pub fn init(&'static self) -> Result<&'static Self, log::SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(LevelFilter::Trace);
        Ok(self)
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.state.lock().expect("Failed to lock logger state").level = level;
    }

    pub fn print_deferred(&self) {
        let mut state = self.state.lock().expect("Failed to lock logger state");
        let deferred = std::mem::take(&mut state.deferred);
        for (level, message) in deferred {
            if level <= state.level {
                let _ = writeln!(state.output, "{}", message);
            }
        }
        state.defer_output = false;
    }

    fn format(record: &Record) -> ColoredString {
        let color = match record.level() {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::White,
            Level::Debug => Color::Blue,
            Level::Trace => Color::BrightBlack,
        };
        let line = match record.level() {
            Level::Debug | Level::Trace => format!(
                "[{:<5}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
            _ => format!("[{:<5}] {}", record.level(), record.args()),
        };
        line.color(color)
    }
}

impl Log for WizardLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level()
            <= self.state.lock().expect("Failed to lock logger state").level
    }

    fn log(&self, record: &Record) {
        let line = Self::format(record);
        let mut state = self.state.lock().expect("Failed to lock logger state");
        if state.defer_output {
            state.deferred.push((record.level(), line));
        } else if record.level() <= state.level {
            let _ = writeln!(state.output, "{}", line);
        }
    }

    fn flush(&self) {
        let _ = self
            .state
            .lock()
            .expect("Failed to lock logger state")
            .output
            .flush();
    }
}
