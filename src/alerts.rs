//! Threshold alerting: pure detection functions over catalog/project/rate-card
//! snapshots, plus the periodic scan task that feeds the rolling
//! notification list.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use tauri::AppHandle;

use crate::engine::format_price;
use crate::models::{
    Equipment, LabourEntry, Material, Notification, NotificationKind, Project, Severity,
};
use crate::state::{AppData, AppState, StoreExt};

/// Rolling notification list keeps the most recent entries only.
pub const NOTIFICATION_CAP: usize = 20;

/// How often the background scan re-evaluates the detection rules.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(60);

/// Baseline hours a labour line is expected to take.
pub const ESTIMATED_HOURS: i32 = 8;

/// A labour line is flagged once it exceeds the estimate by this factor.
pub const OVERRUN_FACTOR: f64 = 1.5;

/// Projects within this many days of their end date raise a deadline alert.
pub const DEADLINE_WINDOW_DAYS: i64 = 7;

fn base_notification(id: String, kind: NotificationKind, message: String, severity: Severity) -> Notification {
    Notification {
        id,
        kind,
        message,
        time: "Just now".to_string(),
        read: false,
        severity,
        item_type: None,
        item_id: None,
        project_id: None,
        labour_id: None,
        old_price: None,
        new_price: None,
        days_remaining: None,
        days_overdue: None,
        overrun_percent: None,
        estimated_hours: None,
        actual_hours: None,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build a price-change notification, or `None` when the price is unchanged.
/// `item_type` is one of "material", "equipment", "labour".
pub fn price_change(
    id: String,
    item_type: &str,
    item_id: &str,
    old_price: f64,
    new_price: f64,
    name: &str,
) -> Option<Notification> {
    if old_price == new_price {
        return None;
    }
    let change_percent = round1((new_price - old_price) / old_price * 100.0);
    let direction = if new_price > old_price {
        "increased"
    } else {
        "decreased"
    };
    let severity = if change_percent.abs() > 10.0 {
        Severity::High
    } else {
        Severity::Medium
    };
    let message = format!(
        "{} price {} by {:.1}% ({} → {})",
        name,
        direction,
        change_percent.abs(),
        format_price(old_price),
        format_price(new_price)
    );
    let mut n = base_notification(id, NotificationKind::PriceChange, message, severity);
    n.item_type = Some(item_type.to_string());
    n.item_id = Some(item_id.to_string());
    n.old_price = Some(old_price);
    n.new_price = Some(new_price);
    Some(n)
}

/// Days from `today` to the project end date. `None` when the stored date
/// does not parse.
fn days_remaining(project: &Project, today: NaiveDate) -> Option<i64> {
    let end = NaiveDate::parse_from_str(&project.end_date, "%Y-%m-%d").ok()?;
    Some((end - today).num_days())
}

fn day_word(days: i64) -> &'static str {
    if days == 1 {
        "day"
    } else {
        "days"
    }
}

pub fn scan_deadlines(projects: &[Project], today: NaiveDate) -> Vec<Notification> {
    let mut alerts = Vec::new();
    for project in projects {
        let Some(remaining) = days_remaining(project, today) else {
            continue;
        };
        if remaining > 0 && remaining <= DEADLINE_WINDOW_DAYS {
            let severity = if remaining <= 3 {
                Severity::High
            } else {
                Severity::Medium
            };
            let mut n = base_notification(
                format!("DEADLINE_{}", project.id),
                NotificationKind::Deadline,
                format!(
                    "Project \"{}\" is due in {} {}",
                    project.name,
                    remaining,
                    day_word(remaining)
                ),
                severity,
            );
            n.project_id = Some(project.id.clone());
            n.days_remaining = Some(remaining);
            alerts.push(n);
        } else if remaining < 0 {
            let overdue = remaining.abs();
            let mut n = base_notification(
                format!("OVERDUE_{}", project.id),
                NotificationKind::Overdue,
                format!(
                    "Project \"{}\" is overdue by {} {}",
                    project.name,
                    overdue,
                    day_word(overdue)
                ),
                Severity::High,
            );
            n.project_id = Some(project.id.clone());
            n.days_overdue = Some(overdue);
            alerts.push(n);
        }
    }
    alerts
}

pub fn scan_budget_overruns(projects: &[Project]) -> Vec<Notification> {
    let mut alerts = Vec::new();
    for project in projects {
        if project.actual_cost <= project.budget {
            continue;
        }
        let overrun = round1((project.actual_cost - project.budget) / project.budget * 100.0);
        let severity = if overrun > 20.0 {
            Severity::High
        } else {
            Severity::Medium
        };
        let mut n = base_notification(
            format!("BUDGET_{}", project.id),
            NotificationKind::BudgetOverrun,
            format!(
                "Project \"{}\" is {:.1}% over budget ({} → {})",
                project.name,
                overrun,
                format_price(project.budget),
                format_price(project.actual_cost)
            ),
            severity,
        );
        n.project_id = Some(project.id.clone());
        n.overrun_percent = Some(overrun);
        alerts.push(n);
    }
    alerts
}

pub fn scan_labour_overruns(
    entries: &[LabourEntry],
    materials: &[Material],
    equipment: &[Equipment],
) -> Vec<Notification> {
    let mut alerts = Vec::new();
    for entry in entries {
        if entry.hours as f64 <= ESTIMATED_HOURS as f64 * OVERRUN_FACTOR {
            continue;
        }
        let item_name = match entry.item_type {
            crate::models::ItemType::Material => materials
                .iter()
                .find(|m| m.id == entry.item_id)
                .map(|m| m.description.clone()),
            crate::models::ItemType::Equipment => equipment
                .iter()
                .find(|e| e.id == entry.item_id)
                .map(|e| e.name.clone()),
        }
        .unwrap_or_else(|| entry.description.clone());
        let mut n = base_notification(
            format!("LABOUR_{}", entry.id),
            NotificationKind::LabourOverrun,
            format!(
                "Labour hours for {} exceeded estimate ({}h → {}h)",
                item_name, ESTIMATED_HOURS, entry.hours
            ),
            Severity::Medium,
        );
        n.labour_id = Some(entry.id.clone());
        n.estimated_hours = Some(ESTIMATED_HOURS);
        n.actual_hours = Some(entry.hours);
        alerts.push(n);
    }
    alerts
}

/// One full evaluation cycle over the current state. Pure: the caller merges
/// the result via `AppState::apply_scan`.
pub fn run_scan(state: &AppState, today: NaiveDate) -> Vec<Notification> {
    let mut alerts = scan_deadlines(&state.projects, today);
    alerts.extend(scan_budget_overruns(&state.projects));
    alerts.extend(scan_labour_overruns(
        &state.selected_labour,
        &state.materials,
        &state.equipment,
    ));
    alerts
}

/// Start the periodic scan for the lifetime of the notifications view.
/// Replaces any scan already running.
pub fn start(app: AppHandle) -> Result<(), String> {
    let store = app.store();
    let mut slot = store.alert_task.lock().map_err(|e| e.to_string())?;
    if let Some(task) = slot.take() {
        task.abort();
    }
    log::info!("starting alert scan every {}s", SCAN_INTERVAL.as_secs());
    let handle = app.clone();
    *slot = Some(tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(SCAN_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick completes immediately, so the view gets a scan on mount.
        loop {
            interval.tick().await;
            let today = Local::now().date_naive();
            let store = handle.store();
            if let Ok(mut state) = store.state.lock() {
                let active = run_scan(&state, today);
                state.apply_scan(active);
            }
        }
    }));
    Ok(())
}

/// Cancel the periodic scan when the view unmounts.
pub fn stop(store: &AppData) -> Result<(), String> {
    let mut slot = store.alert_task.lock().map_err(|e| e.to_string())?;
    if let Some(task) = slot.take() {
        task.abort();
        log::info!("alert scan stopped");
    }
    Ok(())
}
