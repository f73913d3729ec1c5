//! Viewing context
//!
//! Who is looking, at which squad, over which time window. Passed
//! explicitly into aggregation and selection instead of being read from
//! ambient session state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::period::PeriodFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingContext {
    /// Reference day for relative periods such as `last7days`.
    pub today: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Category (age group) currently being viewed; `None` shows everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub period: PeriodFilter,
}

impl ViewingContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, team_id: None, category_id: None, period: PeriodFilter::All }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_period(mut self, period: PeriodFilter) -> Self {
        self.period = period;
        self
    }

    /// Whether a subject in `category` is visible under this context.
    pub fn includes_category(&self, category: Option<&str>) -> bool {
        match self.category_id.as_deref() {
            None => true,
            Some(viewing) => category == Some(viewing),
        }
    }
}
