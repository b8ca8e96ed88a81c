use crate::{record::SubscriptionRecord, sink::SinkMetrics};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Aggregate view of a finished run, printed by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub rows: usize,
    pub distinct_users: usize,
    /// Rows beyond each user's first subscription.
    pub renewals: usize,
    pub rows_by_country: BTreeMap<String, usize>,
    pub rows_by_plan: BTreeMap<String, usize>,
    pub promoted_rows: usize,
    pub paid_by_currency: BTreeMap<String, f64>,
    pub file_size_bytes: u64,
}

impl RunSummary {
    pub fn from_records(seed: u64, records: &[SubscriptionRecord]) -> Self {
        let mut users = HashSet::new();
        let mut summary = RunSummary {
            seed,
            rows: records.len(),
            ..Default::default()
        };

        for r in records {
            users.insert(r.user_id.as_str());
            *summary.rows_by_country.entry(r.country.clone()).or_default() += 1;
            *summary.rows_by_plan.entry(r.plan.clone()).or_default() += 1;
            *summary.paid_by_currency.entry(r.currency.clone()).or_default() += r.paid_amount;
            if r.promotion.is_some() {
                summary.promoted_rows += 1;
            }
        }

        summary.distinct_users = users.len();
        summary.renewals = summary.rows - summary.distinct_users;
        summary
    }

    pub fn with_sink(mut self, metrics: SinkMetrics) -> Self {
        self.file_size_bytes = metrics.file_size_bytes;
        self
    }
}
