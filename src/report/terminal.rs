use crate::reconcile::{Outcome, Verdict};
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    show_passes: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_passes: false }
    }

    pub fn with_passes(mut self, show: bool) -> Self {
        self.show_passes = show;
        self
    }

    pub fn report(&self, verdicts: &[Verdict]) -> Result<()> {
        let failed = verdicts.iter().filter(|v| v.is_fail()).count();
        let passed = verdicts.len() - failed;

        if verdicts.is_empty() {
            println!(
                "{}",
                "All dependencies reconciled; nothing to report.".green().bold()
            );
            return Ok(());
        }

        for verdict in verdicts {
            match verdict.outcome {
                Outcome::Pass => {
                    if self.show_passes {
                        println!("  {} {}", "ok".green(), verdict.message);
                    }
                }
                Outcome::Fail => {
                    println!(
                        "  {} {} {}",
                        "not ok".red().bold(),
                        verdict.message,
                        format!("[{}]", verdict.reason.code()).dimmed()
                    );
                }
            }
        }

        println!();
        if failed == 0 {
            println!(
                "{}",
                format!("Manifest is in sync: {passed} passed, 0 failed.")
                    .green()
                    .bold()
            );
        } else {
            println!(
                "{}",
                format!("Manifest is out of sync: {passed} passed, {failed} failed.")
                    .red()
                    .bold()
            );
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
