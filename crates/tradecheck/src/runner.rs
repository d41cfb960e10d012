//! One-shot validation run over the users and trades tables.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::report::{CheckOutcome, LogSink, RunSummary};
use crate::rules::{ForeignKeyRule, RuleSet, trades_rules, trades_to_users_fk, users_rules};
use crate::source::DataSource;
use crate::table::Table;

const BANNER_PAD: &str = "==========================================";

/// Configuration for a validation run. Passed in explicitly; there is no
/// process-wide state.
#[derive(Debug, Clone)]
pub struct QaConfig {
    /// Query producing the users table.
    pub users_query: String,
    /// Query producing the trades table.
    pub trades_query: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            users_query: "SELECT * FROM users;".to_string(),
            trades_query: "SELECT * FROM trades;".to_string(),
        }
    }
}

/// Full result of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    /// Aggregate pass/fail counts.
    pub summary: RunSummary,
    /// Every executed check in order.
    pub outcomes: Vec<CheckOutcome>,
}

/// Runs the fixed battery of checks against the two tables.
pub struct QaRunner {
    config: QaConfig,
}

impl QaRunner {
    /// Create a runner with default queries.
    pub fn new() -> Self {
        Self::with_config(QaConfig::default())
    }

    /// Create a runner with custom queries.
    pub fn with_config(config: QaConfig) -> Self {
        Self { config }
    }

    /// Load both tables, validate each, then cross-check referential
    /// integrity. Strictly sequential; each check sees an immutable
    /// table snapshot.
    pub fn run(&self, source: &mut dyn DataSource, sink: &dyn LogSink) -> Result<QaReport> {
        let users = source.fetch("users", &self.config.users_query)?;
        let trades = source.fetch("trades", &self.config.trades_query)?;
        debug!(
            users = users.row_count(),
            trades = trades.row_count(),
            "tables loaded"
        );

        let mut outcomes = Vec::new();
        outcomes.extend(self.run_table(&users, &users_rules(), sink)?);
        outcomes.extend(self.run_table(&trades, &trades_rules(), sink)?);
        outcomes.push(self.run_cross_check(&trades, &users, &trades_to_users_fk(), sink)?);

        Ok(QaReport {
            summary: RunSummary::from_outcomes(&outcomes),
            outcomes,
        })
    }

    /// Run one table's rule set, with start/finish banners.
    fn run_table(
        &self,
        table: &Table,
        rules: &RuleSet,
        sink: &dyn LogSink,
    ) -> Result<Vec<CheckOutcome>> {
        sink.text(format!("{BANNER_PAD}Start checking {}{BANNER_PAD}", rules.table));

        let mut outcomes = Vec::with_capacity(rules.checks.len());
        for (i, check) in rules.checks.iter().enumerate() {
            outcomes.push(check.run(table, i + 1, sink)?);
        }

        sink.text(format!("{BANNER_PAD}Finish checking {}{BANNER_PAD}", rules.table));
        Ok(outcomes)
    }

    /// Run the cross-reference check between the two tables.
    fn run_cross_check(
        &self,
        child: &Table,
        parent: &Table,
        rule: &ForeignKeyRule,
        sink: &dyn LogSink,
    ) -> Result<CheckOutcome> {
        sink.text(format!("{BANNER_PAD}Start cross reference check{BANNER_PAD}"));
        let outcome = rule.run(child, parent, 1, sink)?;
        sink.text(format!("{BANNER_PAD}Finish cross reference check{BANNER_PAD}"));
        Ok(outcome)
    }
}

impl Default for QaRunner {
    fn default() -> Self {
        Self::new()
    }
}
