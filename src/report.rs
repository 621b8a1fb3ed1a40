//! Work Report Generation
//!
//! Renders broker statistics into a Markdown or plain-text report.
//! Both renderings carry the same content; only headings and delimiters differ.

use chrono::NaiveDateTime;

use crate::date_utils::{self, DateRange};
use crate::models::Todo;
use crate::stats::{self, OrderedMap};

/// Which period the report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Daily,
    Weekly,
    Custom,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [Self::Daily, Self::Weekly, Self::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Custom => "custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Daily -> today, weekly -> this week, custom -> `custom`
    /// (or the last seven days when none was picked).
    pub fn resolve_range(self, custom: Option<DateRange>, now: NaiveDateTime) -> DateRange {
        match self {
            Self::Daily => date_utils::today_at(now),
            Self::Weekly => date_utils::this_week_at(now),
            Self::Custom => custom.unwrap_or_else(|| {
                date_utils::last_n_days_at(7, now).unwrap_or_else(|_| date_utils::today_at(now))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Text,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown;charset=utf-8",
            Self::Text => "text/plain;charset=utf-8",
        }
    }
}

/// Every literal that appears in a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLabels {
    pub daily_title: String,
    pub weekly_title: String,
    pub custom_title: String,
    pub time_range: String,
    pub overview: String,
    pub completed_count: String,
    pub broker_count: String,
    pub distribution: String,
    pub task_count: String,
    pub workload_share: String,
    pub task_list: String,
    pub generated_at: String,
    pub unit: String,
    pub file_label: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            daily_title: "日报".into(),
            weekly_title: "周报".into(),
            custom_title: "工作报告".into(),
            time_range: "时间范围".into(),
            overview: "总体概况".into(),
            completed_count: "已完成任务数".into(),
            broker_count: "涉及券商数".into(),
            distribution: "券商工作分布".into(),
            task_count: "完成任务数".into(),
            workload_share: "工作量占比".into(),
            task_list: "任务列表".into(),
            generated_at: "报告生成时间".into(),
            unit: "个".into(),
            file_label: "工作报告".into(),
        }
    }
}

impl ReportLabels {
    pub fn title(&self, kind: ReportKind) -> &str {
        match kind {
            ReportKind::Daily => &self.daily_title,
            ReportKind::Weekly => &self.weekly_title,
            ReportKind::Custom => &self.custom_title,
        }
    }
}

/// Everything a report is built from
#[derive(Debug, Clone)]
pub struct ReportData {
    pub kind: ReportKind,
    pub range: DateRange,
    /// Completed todos in the window
    pub todos: Vec<Todo>,
    pub brokers: OrderedMap<Vec<Todo>>,
}

impl ReportData {
    pub fn new(kind: ReportKind, range: DateRange, todos: Vec<Todo>, brokers: OrderedMap<Vec<Todo>>) -> Self {
        Self { kind, range, todos, brokers }
    }

    /// Completed todos created inside `range`, grouped by broker
    pub fn collect(kind: ReportKind, range: DateRange, all_todos: &[Todo]) -> Self {
        let todos: Vec<Todo> = stats::filter_by_created(all_todos, &range)
            .into_iter()
            .filter(Todo::is_completed)
            .collect();
        let brokers = stats::broker_todo_lists(&todos);
        Self { kind, range, todos, brokers }
    }

    /// Brokers by descending task count; ties keep breakdown order
    pub fn sorted_brokers(&self) -> Vec<(&str, &[Todo])> {
        let mut sorted: Vec<(&str, &[Todo])> =
            self.brokers.iter().map(|(name, todos)| (name, todos.as_slice())).collect();
        sorted.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        sorted
    }
}

/// `count / total * 100`, or 0 when there is nothing to divide by
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

pub fn format_percentage(count: usize, total: usize) -> String {
    format!("{:.1}", percentage(count, total))
}

#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    labels: ReportLabels,
}

impl ReportGenerator {
    pub fn new(labels: ReportLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &ReportLabels {
        &self.labels
    }

    /// `<label>_<YYYY-MM-DD>.<ext>`
    pub fn file_name(&self, format: ReportFormat, date: NaiveDateTime) -> String {
        format!("{}_{}.{}", self.labels.file_label, date_utils::format_date(date), format.extension())
    }

    pub fn generate(&self, format: ReportFormat, data: &ReportData, generated_at: NaiveDateTime) -> String {
        match format {
            ReportFormat::Markdown => self.markdown(data, generated_at),
            ReportFormat::Text => self.text(data, generated_at),
        }
    }

    pub fn markdown(&self, data: &ReportData, generated_at: NaiveDateTime) -> String {
        let l = &self.labels;
        let total = data.todos.len();

        let mut md = format!("# {}\n\n", l.title(data.kind));
        md += &format!("**{}**: {}\n\n---\n\n", l.time_range, data.range.format());
        md += &format!("## 📊 {}\n\n", l.overview);
        md += &format!("- {}：**{}** {}\n", l.completed_count, total, l.unit);
        md += &format!("- {}：**{}** {}\n\n---\n\n", l.broker_count, data.brokers.len(), l.unit);
        md += &format!("## 📈 {}\n\n", l.distribution);

        for (broker, todos) in data.sorted_brokers() {
            md += &format!("### {}\n\n", broker);
            md += &format!("- {}：**{}** {}\n", l.task_count, todos.len(), l.unit);
            md += &format!("- {}：**{}%**\n\n**{}：**\n\n", l.workload_share, format_percentage(todos.len(), total), l.task_list);
            for (index, todo) in todos.iter().enumerate() {
                md += &format!("{}. ✅ {}\n", index + 1, todo.title);
            }
            md.push('\n');
        }

        md += &format!("---\n\n*{}：{}*\n", l.generated_at, generated_stamp(generated_at));
        md
    }

    pub fn text(&self, data: &ReportData, generated_at: NaiveDateTime) -> String {
        let l = &self.labels;
        let total = data.todos.len();
        let rule = "-".repeat(50);

        let mut text = format!("{}\n{}: {}\n{}\n\n", l.title(data.kind), l.time_range, data.range.format(), "=".repeat(50));
        text += &format!("{}\n{}\n", l.overview, rule);
        text += &format!("{}: {} {}\n", l.completed_count, total, l.unit);
        text += &format!("{}: {} {}\n\n", l.broker_count, data.brokers.len(), l.unit);
        text += &format!("{}\n{}\n\n", l.distribution, rule);

        for (broker, todos) in data.sorted_brokers() {
            text += &format!("【{}】\n", broker);
            text += &format!("  {}: {} {}\n", l.task_count, todos.len(), l.unit);
            text += &format!("  {}: {}%\n  {}:\n", l.workload_share, format_percentage(todos.len(), total), l.task_list);
            for (index, todo) in todos.iter().enumerate() {
                text += &format!("    {}. {}\n", index + 1, todo.title);
            }
            text.push('\n');
        }

        text += &format!("{}\n{}: {}\n", rule, l.generated_at, generated_stamp(generated_at));
        text
    }
}

fn generated_stamp(at: NaiveDateTime) -> String {
    format!("{} {}", date_utils::format_date(at), at.format("%H:%M:%S"))
}
