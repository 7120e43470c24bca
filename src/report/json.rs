use crate::reconcile::{Outcome, Verdict};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, verdicts: &[Verdict]) -> Result<()> {
        let report = JsonReport::from_verdicts(verdicts);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total: usize,
    passed: usize,
    failed: usize,
    verdicts: Vec<JsonVerdict>,
}

#[derive(Serialize)]
struct JsonVerdict {
    outcome: &'static str,
    reason: &'static str,
    module: Option<String>,
    role: Option<&'static str>,
    message: String,
}

impl JsonReport {
    fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let failed = verdicts.iter().filter(|v| v.is_fail()).count();
        Self {
            version: env!("CARGO_PKG_VERSION"),
            total: verdicts.len(),
            passed: verdicts.len() - failed,
            failed,
            verdicts: verdicts
                .iter()
                .map(|v| JsonVerdict {
                    outcome: match v.outcome {
                        Outcome::Pass => "pass",
                        Outcome::Fail => "fail",
                    },
                    reason: v.reason.code(),
                    module: v.module.as_ref().map(|m| m.to_string()),
                    role: v.role.map(|r| r.as_str()),
                    message: v.message.clone(),
                })
                .collect(),
        }
    }
}
