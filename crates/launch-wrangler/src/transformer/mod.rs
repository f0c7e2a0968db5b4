//! Table enrichment: payload mass imputation and landing class labels.

mod imputation;
mod labeling;

pub use imputation::StatisticalImputer;
pub use labeling::{
    BadOutcomeSet, attach_class_column, class_labels, label_rows, outcome_ranking,
};

use crate::config::WranglingConfig;
use crate::error::{Result, ResultExt};
use crate::types::{ImputationSummary, LabelingSummary};
use polars::prelude::*;
use tracing::info;

/// Applies both enrichments to a table in place.
pub struct Transformer;

impl Transformer {
    /// Impute the payload column and append the class column.
    ///
    /// Labels are computed from the outcome column as loaded, before the
    /// imputation touches the table.
    pub fn apply(
        df: &mut DataFrame,
        config: &WranglingConfig,
    ) -> Result<(ImputationSummary, LabelingSummary)> {
        let ranking = outcome_ranking(df, &config.outcome_column)
            .context("Ranking landing outcomes")?;
        for ranked in &ranking {
            info!("{} {}", ranked.index, ranked.outcome);
        }

        let bad = BadOutcomeSet::select(&ranking, &config.bad_outcomes)
            .context("Selecting bad outcomes")?;
        let labels = label_rows(df, &config.outcome_column, &bad)?;

        let imputation = Self::impute(df, config)?;

        let class_counts = attach_class_column(df, &config.class_column, labels)?;
        info!(
            "Added '{}' column ({} bad outcomes)",
            config.class_column,
            bad.len()
        );

        let labeling = LabelingSummary {
            outcome_column: config.outcome_column.clone(),
            class_column: config.class_column.clone(),
            ranking,
            bad_outcomes: bad.outcomes().to_vec(),
            class_counts,
        };

        Ok((imputation, labeling))
    }

    /// Mean-impute the configured payload column.
    pub fn impute(df: &mut DataFrame, config: &WranglingConfig) -> Result<ImputationSummary> {
        StatisticalImputer::impute_mean(df, &config.payload_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BadOutcomeSelection;
    use crate::error::WranglingError;

    #[test]
    fn test_apply_enriches_table() {
        let mut df = df!(
            "PayloadMass" => &[Some(500.0), None, Some(700.0), None],
            "Outcome" => &["True ASDS", "None None", "False Ocean", "True RTLS"],
        )
        .unwrap();
        let config = WranglingConfig::builder()
            .bad_outcomes(BadOutcomeSelection::Named(vec![
                "None None".to_string(),
                "False Ocean".to_string(),
            ]))
            .build()
            .unwrap();

        let (imputation, labeling) = Transformer::apply(&mut df, &config).unwrap();

        assert_eq!(imputation.mean, Some(600.0));
        assert_eq!(imputation.filled, 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["PayloadMass", "Outcome", "Class"]);

        let class: Vec<Option<i64>> = df
            .column("Class")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(class, vec![Some(1), Some(0), Some(0), Some(1)]);
        assert_eq!(labeling.ranking.len(), 4);
    }

    #[test]
    fn test_apply_fails_before_mutating_on_bad_index() {
        let mut df = df!(
            "PayloadMass" => &[Some(500.0), None],
            "Outcome" => &["True ASDS", "None None"],
        )
        .unwrap();
        let config = WranglingConfig::default();

        let err = Transformer::apply(&mut df, &config).unwrap_err();

        assert_eq!(err.error_code(), "OUTCOME_INDEX_OUT_OF_RANGE");
        assert!(matches!(
            err.root(),
            WranglingError::OutcomeIndexOutOfRange { index: 3, available: 2 }
        ));
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("PayloadMass").unwrap().null_count(), 1);
    }
}
