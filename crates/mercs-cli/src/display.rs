//! Console rendering of visitor progress.

use mercs_core::{TaskStatus, VisitorRecord};
use owo_colors::OwoColorize;

fn colored_status(status: TaskStatus) -> String {
    let name = format!("{:<8}", status.short_name());
    match status {
        TaskStatus::Claimed => name.green().to_string(),
        TaskStatus::Complete => name.cyan().bold().to_string(),
        TaskStatus::InProgress => name.yellow().to_string(),
        TaskStatus::NotStarted => name.dimmed().to_string(),
        TaskStatus::Invalid => name.red().to_string(),
    }
}

/// One line per visitor task, sorted by task id
pub fn format_visitors(visitors: &[VisitorRecord]) -> String {
    if visitors.is_empty() {
        return "No visitor progress recorded".to_string();
    }

    let mut sorted: Vec<&VisitorRecord> = visitors.iter().collect();
    sorted.sort_by_key(|v| v.task_id);

    let mut lines = vec![format!(
        "{:>8}  {:>8}  {:<8}  {:>5}  {:>5}",
        "Task", "Visitor", "Status", "Chain", "Prog"
    )];
    lines.extend(sorted.into_iter().map(|v| {
        format!(
            "{:>8}  {:>8}  {}  {:>5}  {:>5}",
            v.task_id,
            v.visitor_id,
            colored_status(v.status),
            v.task_chain_progress,
            v.task_progress
        )
    }));
    lines.join("\n")
}

/// Short per-status count, e.g. "2 ACTIVE, 1 CLAIMED"
pub fn summarize(visitors: &[VisitorRecord]) -> String {
    let statuses = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Complete,
        TaskStatus::Claimed,
    ];
    let parts: Vec<String> = statuses
        .iter()
        .filter_map(|status| {
            let count = visitors.iter().filter(|v| v.status == *status).count();
            (count > 0).then(|| format!("{} {}", count, status))
        })
        .collect();

    if parts.is_empty() {
        "no visitors".to_string()
    } else {
        parts.join(", ")
    }
}
