//! Aggregation and rendering of dataset reports.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::verdict::{CheckId, ErrorKind, Verdict};
use crate::exit_codes;
use crate::outcome::Outcome;
use crate::run::DatasetReport;

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub datasets: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    /// `check label -> (passed, evaluated)`.
    pub check_pass_rates: BTreeMap<CheckId, (usize, usize)>,
}

impl RunSummary {
    /// Load errors take precedence over check failures.
    pub fn exit_code(&self) -> i32 {
        if self.errored > 0 {
            exit_codes::INVALID
        } else if self.failed > 0 {
            exit_codes::CHECKS_FAILED
        } else {
            exit_codes::OK
        }
    }
}

pub fn aggregate(reports: &[DatasetReport]) -> RunSummary {
    let mut summary = RunSummary::default();
    for report in reports {
        summary.datasets += 1;
        match report.outcome {
            Outcome::Pass => summary.passed += 1,
            Outcome::Fail => summary.failed += 1,
            Outcome::Error => summary.errored += 1,
        }
        update_check_pass_rates(&mut summary.check_pass_rates, &report.verdicts);
    }
    summary
}

fn update_check_pass_rates(stats: &mut BTreeMap<CheckId, (usize, usize)>, verdicts: &[Verdict]) {
    for verdict in verdicts {
        let entry = stats.entry(verdict.check).or_insert((0, 0));
        if verdict.passed() {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
}

/// Plain-text report: one line per verdict, then the summary.
pub fn render_text(reports: &[DatasetReport], summary: &RunSummary) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "dataset: {} outcome={:?}\n",
            report.dataset, report.outcome
        ));
        for verdict in &report.verdicts {
            out.push_str(&verdict_line(verdict));
        }
        if let Some(err) = &report.load_error {
            out.push_str(&format!("  {} {err}\n", ErrorKind::Load));
        }
    }
    out.push_str(&format!(
        "summary: datasets={} pass={} fail={} error={}\n",
        summary.datasets, summary.passed, summary.failed, summary.errored
    ));
    for (check, (passed, total)) in &summary.check_pass_rates {
        out.push_str(&format!("summary: check {check} {passed}/{total}\n"));
    }
    out
}

fn verdict_line(verdict: &Verdict) -> String {
    let check = verdict.check;
    match verdict.failure() {
        None => format!("  PASS {} {check}\n", check.number()),
        Some(failure) => format!(
            "  FAIL {} {check} [{}] {}\n",
            check.number(),
            failure.kind,
            failure.message
        ),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    datasets: &'a [DatasetReport],
    summary: &'a RunSummary,
}

/// Pretty-printed JSON with a trailing newline.
pub fn render_json(reports: &[DatasetReport], summary: &RunSummary) -> Result<String> {
    let mut payload = serde_json::to_string_pretty(&JsonReport {
        datasets: reports,
        summary,
    })
    .context("serialize report json")?;
    payload.push('\n');
    Ok(payload)
}
