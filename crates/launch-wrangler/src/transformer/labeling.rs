//! Landing outcome labeling.
//!
//! Outcome values are ranked by frequency, a subset of them is marked as
//! unsuccessful, and every row gets a binary class: 0 for an unsuccessful
//! outcome, 1 otherwise.

use crate::config::BadOutcomeSelection;
use crate::error::{Result, WranglingError};
use crate::profiler::value_counts;
use crate::types::{RankedOutcome, ValueCount};
use crate::utils::{series, string_values};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Distinct outcomes ranked by descending frequency, ties by first appearance.
pub fn outcome_ranking(df: &DataFrame, outcome_col: &str) -> Result<Vec<RankedOutcome>> {
    Ok(value_counts(df, outcome_col)?
        .into_iter()
        .enumerate()
        .map(|(index, vc)| RankedOutcome {
            index,
            outcome: vc.value,
            count: vc.count,
        })
        .collect())
}

/// Outcome values treated as unsuccessful landings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadOutcomeSet {
    outcomes: Vec<String>,
    lookup: HashSet<String>,
}

impl BadOutcomeSet {
    /// Pick outcomes by their position in the frequency ranking.
    pub fn from_positions(ranking: &[RankedOutcome], indices: &[usize]) -> Result<Self> {
        let mut set = Self::default();
        for &index in indices {
            let ranked = ranking
                .get(index)
                .ok_or(WranglingError::OutcomeIndexOutOfRange {
                    index,
                    available: ranking.len(),
                })?;
            set.insert(ranked.outcome.clone());
        }
        Ok(set)
    }

    /// Use the given outcome values as-is.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.into());
        }
        set
    }

    /// Build the set described by a configured selection.
    ///
    /// Positions select nothing from an empty ranking, so a zero-row table
    /// can still be labeled.
    pub fn select(ranking: &[RankedOutcome], selection: &BadOutcomeSelection) -> Result<Self> {
        let set = match selection {
            BadOutcomeSelection::Positional(_) if ranking.is_empty() => {
                warn!("No outcomes to rank, no bad outcomes selected");
                Self::default()
            }
            BadOutcomeSelection::Positional(indices) => Self::from_positions(ranking, indices)?,
            BadOutcomeSelection::Named(names) => {
                for name in names {
                    if !ranking.iter().any(|r| &r.outcome == name) {
                        warn!("Bad outcome '{}' does not occur in the data", name);
                    }
                }
                Self::from_names(names.iter().cloned())
            }
        };
        debug!("Bad outcomes: {:?}", set.outcomes);
        Ok(set)
    }

    fn insert(&mut self, outcome: String) {
        if self.lookup.insert(outcome.clone()) {
            self.outcomes.push(outcome);
        }
    }

    pub fn contains(&self, outcome: &str) -> bool {
        self.lookup.contains(outcome)
    }

    /// Members in the order they were selected.
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Class label per outcome: 0 if it is a bad outcome, 1 otherwise.
///
/// A missing outcome is never a member of the set and is labeled 1.
pub fn class_labels(outcomes: &[Option<String>], bad: &BadOutcomeSet) -> Vec<i64> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Some(value) if bad.contains(value) => 0,
            _ => 1,
        })
        .collect()
}

/// Compute class labels from the outcome column, in row order.
pub fn label_rows(df: &DataFrame, outcome_col: &str, bad: &BadOutcomeSet) -> Result<Vec<i64>> {
    let outcomes = string_values(series(df, outcome_col)?)?;
    Ok(class_labels(&outcomes, bad))
}

/// Append (or replace) the class column and return its distribution.
pub fn attach_class_column(
    df: &mut DataFrame,
    class_col: &str,
    labels: Vec<i64>,
) -> Result<Vec<ValueCount>> {
    df.with_column(Series::new(class_col.into(), labels))?;
    value_counts(df, class_col)
}
