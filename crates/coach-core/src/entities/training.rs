//! Training entity - one scheduled session on one date of a relationship

use chrono::NaiveDate;

use crate::value_objects::Snowflake;

/// A training, either persisted or a transient placeholder for an empty day.
///
/// Placeholders have no `id` and an empty description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Training {
    pub id: Option<Snowflake>,
    pub relation_id: Snowflake,
    pub date: NaiveDate,
    /// Written by the coach
    pub description: String,
    /// Written by the runner after the session
    pub execution: Option<String>,
    /// The runner does not see the training before this date
    pub visible_since: Option<NaiveDate>,
}

impl Training {
    pub fn new(id: Snowflake, relation_id: Snowflake, date: NaiveDate, description: String) -> Self {
        Self {
            id: Some(id),
            relation_id,
            date,
            description,
            execution: None,
            visible_since: None,
        }
    }

    /// Unsaved stand-in for a day with nothing scheduled
    pub fn placeholder(relation_id: Snowflake, date: NaiveDate) -> Self {
        Self {
            id: None,
            relation_id,
            date,
            description: String::new(),
            execution: None,
            visible_since: None,
        }
    }

    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the runner may see this training on `today`
    pub fn is_visible_on(&self, today: NaiveDate) -> bool {
        self.visible_since.is_none_or(|since| since <= today)
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    /// Record the runner's report; blank input clears it
    pub fn set_execution(&mut self, execution: Option<String>) {
        self.execution = execution.filter(|e| !e.trim().is_empty());
    }

    pub fn set_visible_since(&mut self, visible_since: Option<NaiveDate>) {
        self.visible_since = visible_since;
    }
}
