//! View routing for the dashboard shell.
//!
//! Screens never talk to each other; they emit `NavEvent`s and the
//! `Navigator` folds them into the current view and selected user.

use crate::{model::User, snapshot::DashboardSnapshot, types::UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Dashboard,
    Segments,
    Campaigns,
    Users,
    Performance,
    UserDetail,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Segments,
        View::Campaigns,
        View::Users,
        View::Performance,
        View::UserDetail,
    ];

    pub fn route(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Segments => "segments",
            Self::Campaigns => "campaigns",
            Self::Users => "users",
            Self::Performance => "performance",
            Self::UserDetail => "user-detail",
        }
    }

    /// Unknown routes land on the dashboard.
    pub fn from_route(route: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.route() == route)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    ChangeView { view: View },
    SelectUser { user_id: UserId },
    Back,
}

/// What the user detail screen shows for the selected id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserDetail<'a> {
    Found(&'a User),
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    pub current: View,
    pub selected_user: Option<UserId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: NavEvent) -> View {
        match event {
            NavEvent::ChangeView { view } => self.current = view,
            NavEvent::SelectUser { user_id } => {
                self.selected_user = Some(user_id);
                self.current = View::UserDetail;
            }
            NavEvent::Back => self.current = View::Dashboard,
        }
        log::debug!(
            "navigation: view={} selected_user={:?}",
            self.current.route(),
            self.selected_user
        );
        self.current
    }

    /// Resolve the selected user against the snapshot. A stale or
    /// missing id is `NotFound`, never an error.
    pub fn user_detail<'a>(&self, snapshot: &'a DashboardSnapshot) -> UserDetail<'a> {
        self.selected_user
            .as_deref()
            .and_then(|id| snapshot.user(id))
            .map_or(UserDetail::NotFound, UserDetail::Found)
    }
}
