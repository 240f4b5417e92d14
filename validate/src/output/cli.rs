//! Colored CLI output for scenario replay
//!
//! Formats host steps, notifications, and checkpoint results with
//! colored output for easy visual parsing.

use std::io::{self, Write};

use spotwatch_core::{TICK_MILLIS, Tick};

use crate::scenario::Action;
use crate::verification::CheckpointResult;

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputLevel {
    /// Only show summary at end
    Quiet,
    /// Show checkpoints and notifications (default)
    #[default]
    Normal,
    /// Show every scripted step as well
    Verbose,
}

/// CLI output formatter with color support
#[derive(Debug)]
pub struct CliOutput {
    level: OutputLevel,
    use_colors: bool,
    steps_applied: u32,
    spawns: u32,
    departures: u32,
    notifications: u32,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new(OutputLevel::Normal)
    }
}

impl CliOutput {
    pub fn new(level: OutputLevel) -> Self {
        Self {
            level,
            use_colors: atty::is(atty::Stream::Stdout),
            steps_applied: 0,
            spawns: 0,
            departures: 0,
            notifications: 0,
        }
    }

    /// Format a tick with its game time, e.g. `T200 02:00.0`
    pub fn format_tick(&self, tick: Tick) -> String {
        let secs = f64::from(tick) * f64::from(TICK_MILLIS) / 1000.0;
        let mins = (secs / 60.0).floor() as u32;
        let secs_remainder = secs % 60.0;
        format!("T{:<5} {:02}:{:04.1}", tick, mins, secs_remainder)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ANSI Color Codes
    // ═══════════════════════════════════════════════════════════════════════════

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }

    fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint("36", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Event Output
    // ═══════════════════════════════════════════════════════════════════════════

    /// Log scenario header
    pub fn scenario_start(&self, name: &str, description: Option<&str>) {
        if self.level < OutputLevel::Normal {
            return;
        }
        let label = self.bold(&self.cyan(&format!("═══ SCENARIO: {} ═══", name)));
        println!("\n{}", label);
        if let Some(description) = description {
            println!("{}", self.dim(description));
        }
        println!();
    }

    /// Log a scripted host step
    pub fn step(&mut self, tick: Tick, action: &Action) {
        self.steps_applied += 1;
        match action {
            Action::Spawn { .. } => self.spawns += 1,
            Action::Despawn { .. } | Action::Invalidate { .. } => self.departures += 1,
            _ => {}
        }
        if self.level < OutputLevel::Verbose {
            return;
        }

        let time_str = self.format_tick(tick);
        let arrow = match action {
            Action::Spawn { .. } => self.green("-->"),
            Action::Despawn { .. } | Action::Invalidate { .. } => self.yellow("<--"),
            _ => self.dim("..."),
        };
        println!("[{}] {} {}", time_str, arrow, action.describe());
    }

    /// Log a step that had no effect (target already gone)
    pub fn skipped(&self, tick: Tick, action: &Action) {
        if self.level < OutputLevel::Verbose {
            return;
        }
        let time_str = self.format_tick(tick);
        println!(
            "[{}] {} {}",
            time_str,
            self.dim("x--"),
            self.dim(&format!("{} (not live, skipped)", action.describe()))
        );
    }

    /// Log a chat notification
    pub fn notification(&mut self, tick: Tick, message: &str) {
        self.notifications += 1;
        if self.level < OutputLevel::Normal {
            return;
        }

        let time_str = self.format_tick(tick);
        let marker = self.red("!!!");
        let label = self.red("NOTIFY:");
        println!("[{}] {} {} \"{}\"", time_str, marker, label, message);
    }

    /// Log a checkpoint result
    pub fn checkpoint(&self, result: &CheckpointResult) {
        if self.level < OutputLevel::Normal && result.passed {
            return;
        }

        let time_str = self.format_tick(result.at);
        let description = result
            .description
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        if result.passed {
            println!("[{}] {}{}", time_str, self.green("[PASS]"), description);
        } else {
            println!("[{}] {}{}", time_str, self.red("[FAIL]"), description);
            for failure in &result.failures {
                println!("         - {}", failure);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Summary Report
    // ═══════════════════════════════════════════════════════════════════════════

    /// Print final summary
    pub fn print_summary(&self, end_tick: Tick, checkpoints_passed: (u32, u32)) {
        let line = "═".repeat(51);
        println!();
        println!("{}", line);
        println!("  SCENARIO SUMMARY");
        println!("{}", line);
        println!("Ticks Replayed:  {}", end_tick);
        println!("Steps Applied:   {}", self.steps_applied);
        println!("Spawns:          {}", self.spawns);
        println!("Departures:      {}", self.departures);
        println!(
            "Notifications:   {}",
            if self.notifications > 0 {
                self.yellow(&self.notifications.to_string())
            } else {
                "0".to_string()
            }
        );

        let (passed, total) = checkpoints_passed;
        let status = if passed == total {
            self.green(&format!("PASSED ({}/{})", passed, total))
        } else {
            self.red(&format!("FAILED ({}/{})", passed, total))
        };
        println!("Verification:    {}", status);
        println!("{}", line);
    }

    /// Flush stdout
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        let output = CliOutput::new(OutputLevel::Normal);
        assert_eq!(output.format_tick(0), "T0     00:00.0");
        assert_eq!(output.format_tick(200), "T200   02:00.0");
        assert_eq!(output.format_tick(1001), "T1001  10:00.6");
    }

    #[test]
    fn test_quiet_still_counts() {
        let mut output = CliOutput::new(OutputLevel::Quiet);
        output.step(
            10,
            &Action::Despawn {
                label: "a".to_string(),
            },
        );
        output.notification(20, "You have stopped fishing!");

        assert_eq!(output.steps_applied, 1);
        assert_eq!(output.departures, 1);
        assert_eq!(output.notifications, 1);
    }
}
