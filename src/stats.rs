//! Statistics Aggregation
//!
//! Status counts, per-broker breakdowns and the daily created/completed
//! trend. Broker groupings keep first-seen order so that downstream sorts
//! stay stable.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::date_utils::{self, DateRange};
use crate::error::{AppError, AppResult};
use crate::models::{Todo, TodoStatus};

/// Trend window used when the caller has no date filter
pub const DEFAULT_TREND_DAYS: i64 = 30;

// ========================
// Ordered grouping
// ========================

/// String-keyed map that iterates in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Value for `key`, inserting `init()` at the end if absent
    pub fn get_or_insert_with(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push((key.to_string(), init()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ========================
// Status and broker stats
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStats {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusStats {
    pub fn get(&self, status: TodoStatus) -> usize {
        match status {
            TodoStatus::Pending => self.pending,
            TodoStatus::InProgress => self.in_progress,
            TodoStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

/// Per-broker todos split by status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrokerDetail {
    pub pending: Vec<Todo>,
    pub in_progress: Vec<Todo>,
    pub completed: Vec<Todo>,
    pub total: usize,
}

impl BrokerDetail {
    pub fn list(&self, status: TodoStatus) -> &[Todo] {
        match status {
            TodoStatus::Pending => &self.pending,
            TodoStatus::InProgress => &self.in_progress,
            TodoStatus::Completed => &self.completed,
        }
    }

    fn push(&mut self, status: TodoStatus, todo: Todo) {
        match status {
            TodoStatus::Pending => self.pending.push(todo),
            TodoStatus::InProgress => self.in_progress.push(todo),
            TodoStatus::Completed => self.completed.push(todo),
        }
        self.total += 1;
    }
}

/// Count todos per status. An unrecognized status aborts the count.
pub fn status_stats(todos: &[Todo]) -> AppResult<StatusStats> {
    let mut stats = StatusStats::default();
    for todo in todos {
        match todo.status()? {
            TodoStatus::Pending => stats.pending += 1,
            TodoStatus::InProgress => stats.in_progress += 1,
            TodoStatus::Completed => stats.completed += 1,
        }
    }
    Ok(stats)
}

pub fn broker_stats_detailed(todos: &[Todo]) -> AppResult<OrderedMap<BrokerDetail>> {
    let mut stats = OrderedMap::new();
    for todo in todos {
        let status = todo.status()?;
        stats.get_or_insert_with(&todo.broker, BrokerDetail::default).push(status, todo.clone());
    }
    Ok(stats)
}

pub fn broker_stats(todos: &[Todo]) -> OrderedMap<usize> {
    let mut stats = OrderedMap::new();
    for todo in todos {
        *stats.get_or_insert_with(&todo.broker, || 0) += 1;
    }
    stats
}

/// Broker -> todos, in traversal order; the shape the report consumes
pub fn broker_todo_lists(todos: &[Todo]) -> OrderedMap<Vec<Todo>> {
    let mut lists: OrderedMap<Vec<Todo>> = OrderedMap::new();
    for todo in todos {
        lists.get_or_insert_with(&todo.broker, Vec::new).push(todo.clone());
    }
    lists
}

/// Keep todos whose creation time falls in `range`.
/// Records with an unparseable timestamp are dropped.
pub fn filter_by_created(todos: &[Todo], range: &DateRange) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| todo.created_at().is_some_and(|ts| range.contains(ts)))
        .cloned()
        .collect()
}

// ========================
// Trend series
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub label: String,
    pub created: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn created_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.created).collect()
    }

    pub fn completed_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.completed).collect()
    }
}

/// Daily created/completed counts over `range` (trailing 30 days if `None`).
///
/// `todos` must be the full cached set, not the display window. Completion
/// day is taken from `updated_at` of todos currently completed.
pub fn time_trend(range: Option<&DateRange>, todos: &[Todo]) -> TrendSeries {
    time_trend_at(range, todos, date_utils::now())
}

pub fn time_trend_at(range: Option<&DateRange>, todos: &[Todo], now: NaiveDateTime) -> TrendSeries {
    let days = match range {
        Some(range) => range.days(),
        None => {
            let start = date_utils::date_start(now) - chrono::Duration::days(DEFAULT_TREND_DAYS - 1);
            date_utils::dates_between(start, now)
        }
    };

    let mut buckets: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
    for todo in todos {
        if let Some(created) = todo.created_at() {
            buckets.entry(created.date()).or_default().0 += 1;
        }
        if todo.is_completed() {
            if let Some(updated) = todo.updated_at() {
                buckets.entry(updated.date()).or_default().1 += 1;
            }
        }
    }

    let points = days
        .map(|midnight| {
            let day = midnight.date();
            let (created, completed) = buckets.get(&day).copied().unwrap_or_default();
            TrendPoint { day, label: date_utils::format_day(day), created, completed }
        })
        .collect();

    TrendSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_todo;

    fn sample() -> Vec<Todo> {
        vec![
            make_todo(1, "Beta", "pending", "2024-03-08 09:00:00", "2024-03-08 09:00:00"),
            make_todo(2, "Alpha", "completed", "2024-03-08 10:00:00", "2024-03-10 18:00:00"),
            make_todo(3, "Beta", "in_progress", "2024-03-09 11:00:00", "2024-03-09 12:00:00"),
            make_todo(4, "Beta", "completed", "2024-03-10 08:00:00", "2024-03-10 23:59:00"),
            make_todo(5, "alpha", "pending", "2024-03-10 00:00:00", "2024-03-10 00:00:00"),
        ]
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_status_stats_counts_sum_to_len() {
        let todos = sample();
        let stats = status_stats(&todos).unwrap();
        assert_eq!(stats, StatusStats { pending: 2, in_progress: 1, completed: 2 });
        assert_eq!(stats.total(), todos.len());
    }

    #[test]
    fn test_status_stats_empty() {
        assert_eq!(status_stats(&[]).unwrap(), StatusStats::default());
    }

    #[test]
    fn test_status_stats_rejects_unknown_status() {
        let mut todos = sample();
        todos.push(make_todo(9, "Beta", "blocked", "2024-03-10 08:00:00", "2024-03-10 08:00:00"));
        assert!(matches!(status_stats(&todos), Err(AppError::UnknownStatus { id: 9, .. })));
        assert!(broker_stats_detailed(&todos).is_err());
    }

    #[test]
    fn test_broker_stats_first_seen_order_and_case_sensitive() {
        let stats = broker_stats(&sample());
        let keys: Vec<&str> = stats.keys().collect();
        assert_eq!(keys, vec!["Beta", "Alpha", "alpha"]);
        assert_eq!(stats.get("Beta"), Some(&3));
        assert_eq!(stats.iter().map(|(_, n)| *n).sum::<usize>(), 5);
    }

    #[test]
    fn test_broker_names_are_not_trimmed() {
        let todos = vec![
            make_todo(1, "A", "pending", "2024-03-10 08:00:00", "2024-03-10 08:00:00"),
            make_todo(2, "A ", "pending", "2024-03-10 08:00:00", "2024-03-10 08:00:00"),
        ];
        assert_eq!(broker_stats(&todos).len(), 2);
    }

    #[test]
    fn test_broker_stats_detailed_splits_by_status() {
        let detailed = broker_stats_detailed(&sample()).unwrap();
        let beta = detailed.get("Beta").unwrap();
        assert_eq!(beta.total, 3);
        assert_eq!(beta.pending.len(), 1);
        assert_eq!(beta.in_progress.len(), 1);
        assert_eq!(beta.list(TodoStatus::Completed)[0].id, 4);
        assert!(detailed.get("Gamma").is_none());
    }

    #[test]
    fn test_broker_todo_lists_keep_traversal_order() {
        let lists = broker_todo_lists(&sample());
        let beta_ids: Vec<i32> = lists.get("Beta").unwrap().iter().map(|t| t.id).collect();
        assert_eq!(beta_ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_filter_by_created() {
        let mut todos = sample();
        todos.push(make_todo(6, "Beta", "pending", "not a date", "not a date"));
        let range = DateRange::new(at(2024, 3, 9, 0), at(2024, 3, 10, 0));
        let ids: Vec<i32> = filter_by_created(&todos, &range).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_time_trend_explicit_range() {
        let range = DateRange::new(at(2024, 3, 7, 0), at(2024, 3, 10, 23));
        let series = time_trend_at(Some(&range), &sample(), at(2024, 3, 20, 0));
        assert_eq!(series.labels(), vec!["2024-03-07", "2024-03-08", "2024-03-09", "2024-03-10"]);
        assert_eq!(series.created_counts(), vec![0, 2, 1, 2]);
        assert_eq!(series.completed_counts(), vec![0, 0, 0, 2]);
    }

    #[test]
    fn test_time_trend_defaults_to_thirty_days() {
        let series = time_trend_at(None, &sample(), at(2024, 3, 10, 15));
        assert_eq!(series.points.len(), 30);
        assert_eq!(series.points[0].label, "2024-02-10");
        let last = series.points.last().unwrap();
        assert_eq!(last.label, "2024-03-10");
        assert_eq!((last.created, last.completed), (2, 2));
    }

    #[test]
    fn test_time_trend_inverted_range_is_empty() {
        let range = DateRange::new(at(2024, 3, 10, 0), at(2024, 3, 1, 0));
        assert!(time_trend_at(Some(&range), &sample(), at(2024, 3, 10, 0)).points.is_empty());
    }
}
