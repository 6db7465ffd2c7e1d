use anyhow::{Context, Result, anyhow};
use log::trace;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use std::time::Duration;

/// Typing this instead of a path is refused and asked again.
const RESERVED_TOKEN: &str = "run";

/// Interactive collection of how many environments to build and where.
///
/// Reads one line per answer from `input` and writes prompts and feedback to
/// `output`. Nothing is retained once the answers have been returned.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    retry_delay: Duration,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, retry_delay: Duration) -> Self {
        Self {
            input,
            output,
            retry_delay,
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write prompt")
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Err(anyhow!("Input closed before all answers were given"));
        }
        Ok(line.trim().to_string())
    }

    pub fn greet(&mut self) -> Result<()> {
        self.say("👋 Welcome to the Python Environment Setup Wizard!\n")
    }

    /// Asks until a whole number greater than zero is entered.
    pub fn read_count(&mut self) -> Result<u64> {
        loop {
            let answer = self.ask("🔢 How many environments do you need? ")?;
            let count = match answer.parse::<i64>() {
                Ok(count) => count,
                // Still a whole number, just a very large one
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    return Ok(u64::MAX);
                }
                Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
                Err(_) => {
                    trace!("Rejected count '{}'", answer);
                    self.say("🚫 Invalid input. Please enter a number.")?;
                    continue;
                }
            };

            if count <= 0 {
                self.say("⚠️ Please enter a number greater than 0!")?;
                self.say("")?;
                self.say(&format!(
                    "🔄 Resetting in {} seconds...",
                    self.retry_delay.as_secs_f32()
                ))?;
                std::thread::sleep(self.retry_delay);
                continue;
            }

            return Ok(count as u64);
        }
    }

    /// Collects exactly `count` paths, one per line, in the order entered.
    ///
    /// Paths are not checked here; an empty line or a directory that does not
    /// exist is accepted and reported later when the environment is built.
    pub fn read_paths(&mut self, count: u64) -> Result<Vec<String>> {
        self.say("\n📥 Enter one path per line (requires requirements.txt):\n")?;

        let mut paths = Vec::new();
        while (paths.len() as u64) < count {
            let entry = self.ask(&format!("📍 Path {}: ", paths.len() + 1))?;
            if entry.eq_ignore_ascii_case(RESERVED_TOKEN) {
                self.say("⚠️ Not enough paths entered. Keep going!")?;
                continue;
            }
            paths.push(entry);
        }

        Ok(paths)
    }
}
