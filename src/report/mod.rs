mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::reconcile::Verdict;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "terminal" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Reporter for the verdict stream
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_passes: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_passes: false,
        }
    }

    pub fn with_passes(mut self, show: bool) -> Self {
        self.show_passes = show;
        self
    }

    /// Emit the verdicts in their reconciliation order.
    pub fn report(&self, verdicts: &[Verdict]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new().with_passes(self.show_passes);
                reporter.report(verdicts)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(verdicts)
            }
        }
    }
}
