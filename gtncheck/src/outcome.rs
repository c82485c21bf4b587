use serde::{Deserialize, Serialize};

use crate::core::verdict::Verdict;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

pub fn classify_outcome(load_failed: bool, verdicts: &[Verdict]) -> Outcome {
    if load_failed {
        Outcome::Error
    } else if verdicts.iter().all(Verdict::passed) {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}
