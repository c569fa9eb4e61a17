//! Read-only queries behind the users table, segment browser and
//! dashboard lists. None of these mutate or fail; a miss is `None` or
//! an empty list.

use crate::model::{Plan, Segment, User};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_TABLE_LIMIT: usize = 50;
pub const DASHBOARD_LIST_LIMIT: usize = 10;
pub const AT_RISK_THRESHOLD: f64 = 0.6;
pub const UPGRADE_MAX_CHURN: f64 = 0.3;

pub fn find_user<'a>(users: &'a [User], id: &str) -> Option<&'a User> {
    users.iter().find(|u| u.id == id)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Email,
    Company,
    Clv,
    ChurnProbability,
    DaysActive,
    Plan,
    LastLogin,
    SignupDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, sort and page state of the users table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserQuery {
    pub search: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
    pub limit: Option<usize>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: SortField::ChurnProbability,
            direction: SortDirection::Desc,
            limit: Some(DEFAULT_TABLE_LIMIT),
        }
    }
}

impl UserQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Column header click: same field flips, new field starts descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.direction = self.direction.flipped();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Desc;
        }
    }

    /// Case-insensitive substring match on name, company or email.
    pub fn matches(&self, user: &User) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        user.name.to_lowercase().contains(&needle)
            || user.company.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
    }

    /// Filter, stable-sort and truncate.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        let mut rows: Vec<&User> = users.iter().filter(|u| self.matches(u)).collect();
        rows.sort_by(|a, b| {
            let ord = compare_by(self.sort_field, a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }
}

fn compare_by(field: SortField, a: &User, b: &User) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Company => a.company.cmp(&b.company),
        SortField::Clv => a.clv.cmp(&b.clv),
        SortField::ChurnProbability => a.churn_probability.total_cmp(&b.churn_probability),
        SortField::DaysActive => a.days_active.cmp(&b.days_active),
        SortField::Plan => a.plan.label().cmp(b.plan.label()),
        SortField::LastLogin => a.last_login.cmp(&b.last_login),
        SortField::SignupDate => a.signup_date.cmp(&b.signup_date),
    }
}

/// Segment browser search: case-insensitive match on the name.
pub fn search_segments<'a>(segments: &'a [Segment], term: &str) -> Vec<&'a Segment> {
    let needle = term.to_lowercase();
    segments
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

/// Dashboard "at risk" list: churn above 0.6, riskiest first, top 10.
pub fn at_risk_users(users: &[User]) -> Vec<&User> {
    let mut rows: Vec<&User> = users
        .iter()
        .filter(|u| u.churn_probability > AT_RISK_THRESHOLD)
        .collect();
    rows.sort_by(|a, b| b.churn_probability.total_cmp(&a.churn_probability));
    rows.truncate(DASHBOARD_LIST_LIMIT);
    rows
}

/// Dashboard "upgrade opportunities": healthy non-Enterprise users by CLV, top 10.
pub fn upgrade_opportunities(users: &[User]) -> Vec<&User> {
    let mut rows: Vec<&User> = users
        .iter()
        .filter(|u| u.churn_probability < UPGRADE_MAX_CHURN && u.plan != Plan::Enterprise)
        .collect();
    rows.sort_by(|a, b| b.clv.cmp(&a.clv));
    rows.truncate(DASHBOARD_LIST_LIMIT);
    rows
}
