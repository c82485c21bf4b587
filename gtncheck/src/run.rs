//! Per-dataset orchestration.
//!
//! Order for one dataset: inventory and file-type check, then loading, then
//! the rule set. A load failure is fatal for that dataset only.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::format::check_file_format;
use crate::core::rule_set::{run_check, run_rule_set};
use crate::core::verdict::{CheckId, Verdict};
use crate::io::config::ValidatorConfig;
use crate::io::dataset::{LoadError, dataset_name, inventory, load_dataset};
use crate::outcome::{Outcome, classify_outcome};

/// Everything known about one dataset after validation.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub dataset: String,
    pub outcome: Outcome,
    pub load_error: Option<LoadError>,
    pub verdicts: Vec<Verdict>,
}

/// Validate one dataset folder with every check.
pub fn run_dataset(folder: &Path, config: &ValidatorConfig) -> DatasetReport {
    run_dataset_checks(folder, config, &CheckId::ALL)
}

/// Validate one dataset folder with the selected checks, in numbering order.
///
/// Never fails; problems are part of the report. Loading is skipped when only
/// the file-type check is selected.
#[instrument(skip_all, fields(dataset = %folder.display()))]
pub fn run_dataset_checks(
    folder: &Path,
    config: &ValidatorConfig,
    selected: &[CheckId],
) -> DatasetReport {
    let dataset = dataset_name(folder);
    let mut verdicts = Vec::new();
    let mut selected = selected.to_vec();
    selected.sort();
    selected.dedup();

    let sources = match inventory(folder, config) {
        Ok(sources) => sources,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "dataset folder unreadable");
            let load_error = LoadError::new(&dataset, "dataset folder", &err);
            return finish(dataset, Some(load_error), verdicts);
        }
    };
    if selected.contains(&CheckId::FileFormat) {
        verdicts.push(check_file_format(&sources, &config.accepted_extensions));
    }
    if selected.iter().all(|check| *check == CheckId::FileFormat) {
        return finish(dataset, None, verdicts);
    }

    let data = match load_dataset(folder, config) {
        Ok(data) => data,
        Err(err) => {
            warn!(error = %err, "dataset load failed");
            return finish(dataset, Some(err), verdicts);
        }
    };
    let settings = config.rule_settings();
    if selected.len() == CheckId::ALL.len() {
        verdicts.extend(run_rule_set(&dataset, &data, &settings));
    } else {
        verdicts.extend(
            selected
                .iter()
                .filter_map(|check| run_check(*check, &dataset, &data, &settings)),
        );
    }
    finish(dataset, None, verdicts)
}

/// Validate several datasets independently, in the given order.
pub fn run_datasets(
    folders: &[impl AsRef<Path>],
    config: &ValidatorConfig,
    selected: &[CheckId],
) -> Vec<DatasetReport> {
    folders
        .iter()
        .map(|folder| run_dataset_checks(folder.as_ref(), config, selected))
        .collect()
}

fn finish(dataset: String, load_error: Option<LoadError>, verdicts: Vec<Verdict>) -> DatasetReport {
    let outcome = classify_outcome(load_error.is_some(), &verdicts);
    let failed = verdicts.iter().filter(|verdict| !verdict.passed()).count();
    info!(dataset = %dataset, ?outcome, checks = verdicts.len(), failed, "dataset validated");
    DatasetReport {
        dataset,
        outcome,
        load_error,
        verdicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verdict::{CheckId, ErrorKind};
    use crate::test_support::{XLSX_MAGIC, mapping_json, write_dataset};

    #[test]
    fn load_error_stops_rule_set_but_keeps_format_verdict() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = write_dataset(
            temp.path(),
            "broken",
            &[
                ("GTN.xlsx", XLSX_MAGIC),
                ("Payrun.csv", b"a,b".as_slice()),
                ("mapping.json", mapping_json().as_bytes()),
            ],
        )
        .expect("dataset");

        let report = run_dataset(&dir, &ValidatorConfig::default());
        assert_eq!(report.outcome, Outcome::Error);
        assert_eq!(report.verdicts.len(), 1);
        let format = &report.verdicts[0];
        assert_eq!(format.check, CheckId::FileFormat);
        let failure = format.failure().expect("format failure");
        assert_eq!(failure.kind, ErrorKind::Format);
        assert_eq!(failure.offending, vec!["Payrun.csv"]);
        let load_error = report.load_error.expect("load error");
        assert_eq!(load_error.file, "GTN.xlsx");
    }

    #[test]
    fn missing_folder_is_a_load_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let report = run_dataset(&temp.path().join("absent"), &ValidatorConfig::default());
        assert_eq!(report.outcome, Outcome::Error);
        assert!(report.verdicts.is_empty());
        assert_eq!(report.load_error.expect("load error").file, "dataset folder");
    }

    #[test]
    fn datasets_are_independent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let first = write_dataset(temp.path(), "a", &[]).expect("a");
        let second = write_dataset(temp.path(), "b", &[("GTN.xlsx", XLSX_MAGIC)]).expect("b");
        let reports = run_datasets(
            &[first, second],
            &ValidatorConfig::default(),
            &CheckId::ALL,
        );
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|report| report.outcome == Outcome::Error));
        assert!(reports[1].dataset.ends_with('b'));
    }

    #[test]
    fn format_only_selection_skips_loading() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = write_dataset(
            temp.path(),
            "d",
            &[("GTN.xlsx", XLSX_MAGIC), ("Payrun.xlsx", XLSX_MAGIC)],
        )
        .expect("dataset");
        let report =
            run_dataset_checks(&dir, &ValidatorConfig::default(), &[CheckId::FileFormat]);
        assert_eq!(report.outcome, Outcome::Pass);
        assert!(report.load_error.is_none());
        assert_eq!(report.verdicts.len(), 1);
    }

    #[test]
    fn selection_without_format_check_still_loads() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = write_dataset(temp.path(), "d", &[("GTN.xlsx", XLSX_MAGIC)]).expect("dataset");
        let report = run_dataset_checks(
            &dir,
            &ValidatorConfig::default(),
            &[CheckId::NumericElements, CheckId::EmptyRows],
        );
        assert!(report.verdicts.is_empty());
        assert_eq!(report.outcome, Outcome::Error);
    }
}
