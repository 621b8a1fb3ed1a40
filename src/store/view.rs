//! View State Store
//!
//! UI selections shared between panels, with field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::date_utils::{self, DateRange};
use crate::models::TodoStatus;
use crate::report::ReportKind;
use crate::stats::DEFAULT_TREND_DAYS;

/// Window applied to the statistics panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatsWindow {
    #[default]
    All,
    Today,
    ThisWeek,
    Last7Days,
    Last30Days,
}

impl StatsWindow {
    pub const ALL: [StatsWindow; 5] = [Self::All, Self::Today, Self::ThisWeek, Self::Last7Days, Self::Last30Days];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "week",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "全部",
            Self::Today => "今日",
            Self::ThisWeek => "本周",
            Self::Last7Days => "近7天",
            Self::Last30Days => "近30天",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == value)
    }

    /// `None` means no filter
    pub fn range(self) -> Option<DateRange> {
        match self {
            Self::All => None,
            Self::Today => Some(date_utils::today()),
            Self::ThisWeek => Some(date_utils::this_week()),
            Self::Last7Days => date_utils::last_n_days(7).ok(),
            Self::Last30Days => date_utils::last_n_days(DEFAULT_TREND_DAYS).ok(),
        }
    }
}

#[derive(Clone, Debug, Default, Store)]
pub struct ViewState {
    pub stats_window: StatsWindow,
    pub report_kind: ReportKind,
    /// Status tab in the todo list; `None` shows everything
    pub status_filter: Option<TodoStatus>,
    pub search_query: String,
}

/// Type alias for the store
pub type ViewStore = Store<ViewState>;

/// Get the view store from context
pub fn use_view_store() -> ViewStore {
    expect_context::<ViewStore>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_window_parse() {
        for window in StatsWindow::ALL {
            assert_eq!(StatsWindow::parse(window.as_str()), Some(window));
        }
        assert_eq!(StatsWindow::All.range(), None);
        assert!(StatsWindow::Last7Days.range().is_some());
    }
}
