//! Tests for the rate-card engine, alerting rules and state transitions.
//! Everything runs against a plain in-memory AppState.

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use crate::alerts;
    use crate::commands::projects::{parse_import_file, write_performance_csv, write_projects_json};
    use crate::commands::quotes::{normalize_quote, write_quotes_csv};
    use crate::engine;
    use crate::models::{
        CreateLabourEntry, CreateQuote, CreateTask, ItemType, LabourRole, MaterialKind,
        NotificationKind, Project, ProjectImport, QuoteItem, Severity, UpdateLabourEntry,
        UpdateLabourRole, UpdateMaterial, UpdateProject,
    };
    use crate::state::AppState;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn project(id: &str, name: &str, end_date: &str, budget: f64, actual_cost: f64) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            status: "In Progress".to_string(),
            budget,
            actual_cost,
            start_date: "2025-01-01".to_string(),
            end_date: end_date.to_string(),
            description: String::new(),
            manager: "Alex Carter".to_string(),
            progress: 50,
            priority: "Medium".to_string(),
            category: "Construction".to_string(),
        }
    }

    fn role(labour_type: &str, state: &str, base_rate: f64, adjustment: f64) -> LabourRole {
        LabourRole {
            id: format!("LR-{}-{}", labour_type, state),
            labour_type: labour_type.to_string(),
            base_rate,
            state: state.to_string(),
            state_adjustment: adjustment,
        }
    }

    fn add_task(state: &mut AppState, desc: &str, persons: i32, hours: i32) -> String {
        state
            .create_task(CreateTask {
                description: desc.to_string(),
                persons,
                hours,
                labour_type: "Labour Normal".to_string(),
                state: "NSW".to_string(),
            })
            .unwrap()
            .id
    }

    // ===== ENGINE TESTS =====

    #[test]
    fn test_material_total_sums_price_times_qty() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 2); // 132.00 each
        state.add_material_selection("M14", 1); // 6.50
        let totals = state.totals();
        assert!((totals.materials - 270.50).abs() < 1e-9);
        assert_eq!(totals.tasks, 0.0);
    }

    #[test]
    fn test_unknown_selection_ids_contribute_zero() {
        let mut state = AppState::seeded();
        state.add_material_selection("NOPE", 5);
        state.add_equipment_selection("NOPE", 3);
        let totals = state.totals();
        assert_eq!(totals.materials, 0.0);
        assert_eq!(totals.equipment, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_deleted_material_degrades_to_zero() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 1);
        state.delete_material("M02");
        assert_eq!(state.totals().materials, 0.0);
        // The selection entry itself is kept.
        assert_eq!(state.selected_materials.len(), 1);
    }

    #[test]
    fn test_material_task_partition() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 3);
        add_task(&mut state, "Install unit", 2, 4); // 2 × 4 × 75 = 600
        let totals = state.totals();

        let all: f64 = state
            .selected_materials
            .iter()
            .filter_map(|s| state.material_by_id(&s.id).map(|m| m.price * s.qty as f64))
            .sum();
        assert!((totals.materials + totals.tasks - all).abs() < 1e-9);
        assert!((totals.materials - 396.0).abs() < 1e-9);
        assert!((totals.tasks - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_equipment_total_is_unfiltered() {
        let mut state = AppState::seeded();
        state.add_equipment_selection("E01", 2); // 5000.00 each
        state.add_equipment_selection("E04", 1); // 800.00
        assert!((state.totals().equipment - 10800.0).abs() < 1e-9);
    }

    #[test]
    fn test_labour_cost_is_derived() {
        let mut state = AppState::seeded();
        let entry = state
            .add_labour_entry(CreateLabourEntry {
                item_id: "M02".to_string(),
                item_type: ItemType::Material,
                persons: 2,
                hours: 4,
                rate: 75.0,
                description: None,
            })
            .unwrap();
        assert!((entry.cost() - 600.0).abs() < 1e-9);
        assert!((state.totals().labour - 600.0).abs() < 1e-9);

        let updated = state
            .update_labour_entry(UpdateLabourEntry {
                id: entry.id,
                persons: 3,
                hours: 4,
                rate: 75.0,
                description: "rework".to_string(),
            })
            .unwrap();
        assert!((updated.cost() - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_crane_fee_gate() {
        assert_eq!(engine::crane_fee(false, 500.0), 0.0);
        assert_eq!(engine::crane_fee(true, 500.0), 500.0);
    }

    #[test]
    fn test_risk_base_excludes_tasks() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 1); // 132.00
        state.set_risk(true, 10.0);
        let without_task = state.totals();
        assert!((without_task.risk_amount - 13.2).abs() < 1e-9);

        // Adding a task must not change the risk amount.
        add_task(&mut state, "Install unit", 2, 4);
        let with_task = state.totals();
        assert!((with_task.risk_amount - 13.2).abs() < 1e-9);
        assert!((with_task.tasks - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_total_identity() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 2);
        state.add_equipment_selection("E04", 1);
        add_task(&mut state, "Swap out", 1, 8);
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "E04".to_string(),
                item_type: ItemType::Equipment,
                persons: 1,
                hours: 6,
                rate: 95.0,
                description: None,
            })
            .unwrap();
        state.set_crane(true, 250.0);
        state.set_risk(true, 12.5);

        let t = state.totals();
        let expected =
            t.materials + t.tasks + t.equipment + t.labour + t.crane_fee + t.risk_amount;
        assert!((t.total - expected).abs() < 1e-9);
        assert!((t.external - (t.crane_fee + t.risk_amount)).abs() < 1e-9);
    }

    #[test]
    fn test_totals_are_pure() {
        let mut state = AppState::seeded();
        state.add_material_selection("M06", 1);
        state.set_risk(true, 10.0);
        let first = state.totals();
        let second = state.totals();
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_price_grouping() {
        assert_eq!(engine::format_price(100.0), "$100.00");
        assert_eq!(engine::format_price(11349.0), "$11,349.00");
        assert_eq!(engine::format_price(1234567.891), "$1,234,567.89");
    }

    // ===== LABOUR RATE TESTS =====

    #[test]
    fn test_resolve_rate_exact_match() {
        let roles = vec![role("installation", "NSW", 75.0, 0.0)];
        assert_eq!(engine::resolve_rate(&roles, "installation", "NSW"), 75.0);
    }

    #[test]
    fn test_resolve_rate_fallback_reapplies_requested_state() {
        let roles = vec![role("installation", "NSW", 75.0, 0.0)];
        // No VIC role; fall back to the NSW-defined type under the VIC multiplier.
        assert_eq!(engine::resolve_rate(&roles, "installation", "VIC"), 75.0);
    }

    #[test]
    fn test_resolve_rate_unknown_type_is_zero() {
        let roles = vec![role("installation", "NSW", 75.0, 0.0)];
        assert_eq!(engine::resolve_rate(&roles, "unknown", "NSW"), 0.0);
    }

    #[test]
    fn test_state_adjustment_overrides_table() {
        let adjusted = role("rigging", "NSW", 100.0, 10.0);
        assert!((engine::effective_rate(&adjusted) - 110.0).abs() < 1e-9);

        let plain = role("rigging", "NSW", 100.0, 0.0);
        assert!((engine::effective_rate(&plain) - 100.0).abs() < 1e-9);

        let discounted = role("rigging", "NSW", 100.0, -5.0);
        assert!((engine::effective_rate(&discounted) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_keeps_role_adjustment() {
        let roles = vec![role("rigging", "NSW", 100.0, 10.0)];
        // The fallback clone carries the role's own adjustment to the new state.
        assert!((engine::resolve_rate(&roles, "rigging", "QLD") - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_state_multiplier_defaults_to_one() {
        let roles = vec![role("installation", "NSW", 80.0, 0.0)];
        assert_eq!(engine::resolve_rate(&roles, "installation", "ZZZ"), 80.0);
    }

    // ===== TASK SYNTHESIS TESTS =====

    #[test]
    fn test_create_task_prices_and_selects() {
        let mut state = AppState::seeded();
        let material = state
            .create_task(CreateTask {
                description: "Install unit".to_string(),
                persons: 2,
                hours: 4,
                labour_type: "Labour Normal".to_string(), // 75/hr
                state: "NSW".to_string(),
            })
            .unwrap();
        assert!((material.price - 600.0).abs() < 1e-9);
        assert_eq!(material.sales_part_no, "CUSTOM");
        assert_eq!(material.site, "CUSTOM");
        assert_eq!(material.kind, MaterialKind::Task);
        assert_eq!(material.description, "Install unit (Labour Normal)");

        let entry = state
            .selected_materials
            .iter()
            .find(|s| s.id == material.id)
            .expect("task should be on the card");
        assert_eq!(entry.qty, 1);
        assert!((state.totals().tasks - 600.0).abs() < 1e-9);
        assert_eq!(state.totals().materials, 0.0);
    }

    #[test]
    fn test_create_task_rejects_bad_input() {
        let mut state = AppState::seeded();
        let materials_before = state.materials.len();

        let empty_desc = state.create_task(CreateTask {
            description: "  ".to_string(),
            persons: 1,
            hours: 8,
            labour_type: "Labour Normal".to_string(),
            state: "NSW".to_string(),
        });
        assert!(empty_desc.is_err());

        let zero_persons = state.create_task(CreateTask {
            description: "Install".to_string(),
            persons: 0,
            hours: 8,
            labour_type: "Labour Normal".to_string(),
            state: "NSW".to_string(),
        });
        assert!(zero_persons.is_err());

        // Unconfigured labour type resolves to a zero rate and blocks creation.
        let no_rate = state.create_task(CreateTask {
            description: "Install".to_string(),
            persons: 1,
            hours: 8,
            labour_type: "installation".to_string(),
            state: "NSW".to_string(),
        });
        assert!(no_rate.is_err());

        assert_eq!(state.materials.len(), materials_before);
        assert!(state.selected_materials.is_empty());
    }

    #[test]
    fn test_task_labour_reuses_last_task_on_card() {
        let mut state = AppState::seeded();
        add_task(&mut state, "First", 1, 8);
        let second = add_task(&mut state, "Second", 1, 8);

        let entry = state
            .add_task_labour("", 2, 3, "Labour Normal", "NSW")
            .unwrap();
        assert_eq!(entry.item_id, second);
        assert_eq!(entry.item_type, ItemType::Material);
        assert!((entry.rate - 75.0).abs() < 1e-9);
        assert!(entry.description.contains("Second (Labour Normal)"));
    }

    #[test]
    fn test_task_labour_creates_task_when_none_selected() {
        let mut state = AppState::seeded();
        let entry = state
            .add_task_labour("Rework", 1, 2, "Labour Normal", "NSW")
            .unwrap();
        let material = state.material_by_id(&entry.item_id).unwrap();
        assert_eq!(material.kind, MaterialKind::Task);
        assert!((material.price - 150.0).abs() < 1e-9); // 1 × 2 × 75
        assert!(state
            .selected_materials
            .iter()
            .any(|s| s.id == entry.item_id && s.qty == 1));
    }

    #[test]
    fn test_task_labour_requires_description_when_creating() {
        let mut state = AppState::seeded();
        let result = state.add_task_labour("  ", 1, 2, "Labour Normal", "NSW");
        assert!(result.is_err());
        assert!(state.selected_labour.is_empty());
        assert!(state.selected_materials.is_empty());
    }

    // ===== PRICE CHANGE TESTS =====

    #[test]
    fn test_price_change_high_severity_above_ten_percent() {
        let n = alerts::price_change("PRICE_1".into(), "material", "M01", 100.0, 115.0, "Generator")
            .unwrap();
        assert_eq!(n.kind, NotificationKind::PriceChange);
        assert_eq!(n.severity, Severity::High);
        assert!(n.message.contains("increased by 15.0%"));
        assert!(n.message.contains("$100.00"));
        assert!(n.message.contains("$115.00"));
        assert_eq!(n.old_price, Some(100.0));
        assert_eq!(n.new_price, Some(115.0));
        assert!(!n.read);
    }

    #[test]
    fn test_price_change_medium_severity_within_ten_percent() {
        let n = alerts::price_change("PRICE_2".into(), "material", "M01", 100.0, 105.0, "Generator")
            .unwrap();
        assert_eq!(n.severity, Severity::Medium);
        assert!(n.message.contains("increased by 5.0%"));
    }

    #[test]
    fn test_price_change_reports_decrease() {
        let n = alerts::price_change("PRICE_3".into(), "equipment", "E01", 5000.0, 4600.0, "Crane 50T")
            .unwrap();
        assert_eq!(n.severity, Severity::Medium);
        assert!(n.message.contains("decreased by 8.0%"));
    }

    #[test]
    fn test_price_change_skipped_when_equal() {
        assert!(alerts::price_change("PRICE_4".into(), "material", "M01", 100.0, 100.0, "x").is_none());
    }

    #[test]
    fn test_update_material_emits_price_change() {
        let mut state = AppState::seeded();
        state
            .update_material(UpdateMaterial {
                id: "M02".to_string(),
                sales_part_no: "2-1671163-1".to_string(),
                description: "12 PORT CONSOLIDATION PORT".to_string(),
                site: "3DT01".to_string(),
                price: 151.80, // +15%
                image: None,
            })
            .unwrap();
        let n = &state.notifications[0];
        assert_eq!(n.kind, NotificationKind::PriceChange);
        assert_eq!(n.severity, Severity::High);
        assert_eq!(n.item_id.as_deref(), Some("M02"));
        assert_eq!(n.item_type.as_deref(), Some("material"));
        assert!((state.material_by_id("M02").unwrap().price - 151.80).abs() < 1e-9);
    }

    #[test]
    fn test_update_material_same_price_is_silent() {
        let mut state = AppState::seeded();
        state
            .update_material(UpdateMaterial {
                id: "M02".to_string(),
                sales_part_no: "2-1671163-1".to_string(),
                description: "renamed".to_string(),
                site: "3DT01".to_string(),
                price: 132.00,
                image: None,
            })
            .unwrap();
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_update_labour_role_emits_price_change() {
        let mut state = AppState::seeded();
        state
            .update_labour_role(UpdateLabourRole {
                id: "LR1".to_string(),
                labour_type: "Labour Normal".to_string(),
                base_rate: 84.0, // +12%
                state: "NSW".to_string(),
                state_adjustment: 0.0,
            })
            .unwrap();
        let n = &state.notifications[0];
        assert_eq!(n.item_type.as_deref(), Some("labour"));
        assert_eq!(n.severity, Severity::High);
        assert!(n.message.contains("Labour Normal labour"));
    }

    // ===== DEADLINE / OVERDUE TESTS =====

    #[test]
    fn test_deadline_three_days_is_high() {
        let end = (today() + Duration::days(3)).to_string();
        let alerts = alerts::scan_deadlines(&[project("P1", "Tower", &end, 0.0, 0.0)], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, NotificationKind::Deadline);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].days_remaining, Some(3));
        assert!(alerts[0].message.contains("due in 3 days"));
    }

    #[test]
    fn test_deadline_seven_days_is_medium() {
        let end = (today() + Duration::days(7)).to_string();
        let alerts = alerts::scan_deadlines(&[project("P1", "Tower", &end, 0.0, 0.0)], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Medium);
    }

    #[test]
    fn test_deadline_outside_window_is_quiet() {
        let far = (today() + Duration::days(8)).to_string();
        assert!(alerts::scan_deadlines(&[project("P1", "Tower", &far, 0.0, 0.0)], today()).is_empty());
        // Due today: neither approaching nor overdue.
        let due_today = today().to_string();
        assert!(
            alerts::scan_deadlines(&[project("P1", "Tower", &due_today, 0.0, 0.0)], today())
                .is_empty()
        );
    }

    #[test]
    fn test_overdue_is_always_high() {
        let end = (today() - Duration::days(1)).to_string();
        let alerts = alerts::scan_deadlines(&[project("P1", "Tower", &end, 0.0, 0.0)], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, NotificationKind::Overdue);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].days_overdue, Some(1));
        assert!(alerts[0].message.contains("overdue by 1 day"));
    }

    // ===== BUDGET / LABOUR OVERRUN TESTS =====

    #[test]
    fn test_budget_overrun_severities() {
        let medium = alerts::scan_budget_overruns(&[project("P1", "A", "2030-01-01", 50000.0, 59000.0)]);
        assert_eq!(medium.len(), 1);
        assert_eq!(medium[0].severity, Severity::Medium);
        assert_eq!(medium[0].overrun_percent, Some(18.0));

        let high = alerts::scan_budget_overruns(&[project("P2", "B", "2030-01-01", 75000.0, 101250.0)]);
        assert_eq!(high[0].severity, Severity::High);
        assert_eq!(high[0].overrun_percent, Some(35.0));

        let under = alerts::scan_budget_overruns(&[project("P3", "C", "2030-01-01", 50000.0, 42000.0)]);
        assert!(under.is_empty());
    }

    #[test]
    fn test_labour_overrun_fires_past_threshold() {
        let mut state = AppState::seeded();
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "E04".to_string(),
                item_type: ItemType::Equipment,
                persons: 1,
                hours: 14,
                rate: 75.0,
                description: None,
            })
            .unwrap();
        let alerts =
            alerts::scan_labour_overruns(&state.selected_labour, &state.materials, &state.equipment);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert_eq!(alerts[0].estimated_hours, Some(8));
        assert_eq!(alerts[0].actual_hours, Some(14));
        assert!(alerts[0].message.contains("Welding Machine"));
    }

    #[test]
    fn test_labour_overrun_boundary_is_quiet() {
        let mut state = AppState::seeded();
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "M02".to_string(),
                item_type: ItemType::Material,
                persons: 1,
                hours: 12, // exactly 8 × 1.5
                rate: 75.0,
                description: None,
            })
            .unwrap();
        assert!(
            alerts::scan_labour_overruns(&state.selected_labour, &state.materials, &state.equipment)
                .is_empty()
        );
    }

    // ===== NOTIFICATION LIST TESTS =====

    #[test]
    fn test_scan_dedups_across_cycles() {
        let mut state = AppState::new();
        let end = (today() - Duration::days(2)).to_string();
        state.projects.push(project("P1", "Tower", &end, 0.0, 0.0));

        state.apply_scan(alerts::run_scan(&state, today()));
        state.apply_scan(alerts::run_scan(&state, today()));
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].id, "OVERDUE_P1");
    }

    #[test]
    fn test_scan_expires_cleared_conditions_but_keeps_price_changes() {
        let mut state = AppState::new();
        let end = (today() - Duration::days(2)).to_string();
        state.projects.push(project("P1", "Tower", &end, 0.0, 0.0));
        state.track_price_change("material", "M01", 100.0, 115.0, "Generator");

        state.apply_scan(alerts::run_scan(&state, today()));
        assert_eq!(state.notifications.len(), 2);

        // Push the deadline out; the overdue alert expires, the price change stays.
        state.projects[0].end_date = (today() + Duration::days(60)).to_string();
        state.apply_scan(alerts::run_scan(&state, today()));
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].kind, NotificationKind::PriceChange);
    }

    #[test]
    fn test_scan_update_preserves_read_flag() {
        let mut state = AppState::new();
        let end = (today() - Duration::days(2)).to_string();
        state.projects.push(project("P1", "Tower", &end, 0.0, 0.0));
        state.apply_scan(alerts::run_scan(&state, today()));
        state.mark_notification_read("OVERDUE_P1").unwrap();

        state.apply_scan(alerts::run_scan(&state, today()));
        assert!(state.notifications[0].read);
    }

    #[test]
    fn test_notification_cap_keeps_newest_twenty() {
        let mut state = AppState::new();
        for i in 0..25 {
            state.track_price_change("material", "M01", 100.0, 100.0 + (i + 1) as f64, "Part");
        }
        assert_eq!(state.notifications.len(), 20);
        // Newest first: the last change reported is at the front.
        assert_eq!(state.notifications[0].new_price, Some(125.0));
    }

    #[test]
    fn test_dismiss_and_mark_read() {
        let mut state = AppState::new();
        state.track_price_change("material", "M01", 100.0, 120.0, "Part");
        let id = state.notifications[0].id.clone();
        state.mark_notification_read(&id).unwrap();
        assert!(state.notifications[0].read);
        state.dismiss_notification(&id);
        assert!(state.notifications.is_empty());
        assert!(state.mark_notification_read(&id).is_err());
    }

    // ===== SUBMISSION TESTS =====

    #[test]
    fn test_submit_rejects_empty_card() {
        let mut state = AppState::seeded();
        let before = state.projects.len();
        let result = state.submit_project(Some("Tower Upgrade".to_string()), today());
        assert!(result.is_err());
        assert_eq!(state.projects.len(), before);
    }

    #[test]
    fn test_submit_rejects_missing_name() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 1);
        let before = state.projects.len();
        assert!(state.submit_project(None, today()).is_err());
        assert_eq!(state.projects.len(), before);
        // The card is untouched on failure.
        assert_eq!(state.selected_materials.len(), 1);
    }

    #[test]
    fn test_submit_creates_project_and_clears_card() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 1); // 132.00
        state.add_equipment_selection("E04", 1); // 800.00
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "E04".to_string(),
                item_type: ItemType::Equipment,
                persons: 1,
                hours: 2,
                rate: 50.0,
                description: None,
            })
            .unwrap(); // 100.00
        state.set_crane(true, 100.0);
        state.set_risk(true, 10.0); // 10% of 1132.00 = 113.20
        state.set_project_name("Tower Upgrade");

        let before = state.projects.len();
        let created = state.submit_project(None, today()).unwrap();
        assert!((created.budget - 1245.20).abs() < 1e-9);
        assert_eq!(created.actual_cost, 0.0);
        assert_eq!(created.status, "Planning");
        assert_eq!(created.progress, 0);
        assert_eq!(created.name, "Tower Upgrade");
        assert_eq!(created.start_date, today().to_string());
        assert_eq!(created.end_date, (today() + Duration::days(90)).to_string());

        assert_eq!(state.projects.len(), before + 1);
        assert_eq!(state.projects[0].id, created.id);

        // Selection state resets to its defaults.
        assert!(state.selected_materials.is_empty());
        assert!(state.selected_equipment.is_empty());
        assert!(state.selected_labour.is_empty());
        assert!(!state.crane_enabled);
        assert_eq!(state.crane_amount, 0.0);
        assert!(!state.risk_enabled);
        assert_eq!(state.risk_percent, 10.0);
        assert!(state.project_name.is_empty());
        assert_eq!(state.totals().total, 0.0);
    }

    // ===== PROJECT TESTS =====

    #[test]
    fn test_new_project_defaults() {
        let mut state = AppState::seeded();
        let created = state.new_project(today());
        assert_eq!(created.status, "Planning");
        assert_eq!(created.budget, 50000.0);
        assert_eq!(created.end_date, (today() + Duration::days(30)).to_string());
        assert_eq!(state.projects[0].id, created.id);
    }

    #[test]
    fn test_update_project_by_id() {
        let mut state = AppState::seeded();
        let updated = state
            .update_project(UpdateProject {
                id: "P001".to_string(),
                name: "Site A Construction".to_string(),
                status: "On Hold".to_string(),
                budget: 52000.0,
                actual_cost: 42000.0,
                start_date: "2024-01-15".to_string(),
                end_date: "2024-08-31".to_string(),
                description: "paused pending approvals".to_string(),
                manager: "John Smith".to_string(),
                progress: 75,
                priority: "High".to_string(),
                category: "Construction".to_string(),
            })
            .unwrap();
        assert_eq!(updated.status, "On Hold");
        assert_eq!(state.projects.iter().find(|p| p.id == "P001").unwrap().budget, 52000.0);

        let missing = state.update_project(UpdateProject {
            id: "P999".to_string(),
            name: String::new(),
            status: String::new(),
            budget: 0.0,
            actual_cost: 0.0,
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            manager: String::new(),
            progress: 0,
            priority: String::new(),
            category: String::new(),
        });
        assert!(missing.is_err());
    }

    #[test]
    fn test_filtered_projects_search_and_status() {
        let state = AppState::seeded();
        let by_name = state.filtered_projects(Some("site a"), None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "P001");

        let by_status = state.filtered_projects(None, Some("progress"));
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].status, "In Progress");

        let by_manager = state.filtered_projects(Some("wilson"), None);
        assert_eq!(by_manager.len(), 1);
    }

    #[test]
    fn test_import_fills_defaults() {
        let mut state = AppState::seeded();
        let before = state.projects.len();
        let imported = state.import_projects(
            vec![
                ProjectImport {
                    name: Some("Fibre Rollout".to_string()),
                    budget: Some(12000.0),
                    ..Default::default()
                },
                ProjectImport::default(),
            ],
            today(),
        );
        assert_eq!(imported.len(), 2);
        assert_eq!(state.projects.len(), before + 2);

        assert_eq!(imported[0].name, "Fibre Rollout");
        assert_eq!(imported[0].status, "Pending");
        assert_eq!(imported[0].budget, 12000.0);
        assert_eq!(imported[0].actual_cost, 0.0);
        assert_eq!(imported[0].manager, "Admin");
        assert_eq!(imported[0].start_date, today().to_string());
        assert_eq!(imported[0].end_date, (today() + Duration::days(30)).to_string());

        assert_eq!(imported[1].name, "Imported Product 2");
    }

    #[test]
    fn test_overall_stats() {
        let state = AppState::seeded();
        let stats = state.overall_stats();
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.completed_projects, 1);
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.total_budget, 150000.0);
        assert_eq!(stats.total_actual_cost, 65000.0);
        assert_eq!(stats.total_savings, 85000.0);
        assert!((stats.avg_efficiency - 85000.0 / 150000.0 * 100.0).abs() < 1e-9);
    }

    // ===== QUOTE TESTS =====

    fn quote_payload(status: &str) -> CreateQuote {
        CreateQuote {
            client: "Telstra InfraCo".to_string(),
            region: None,
            product: Some("Tower Upgrade".to_string()),
            risk: None,
            status: status.to_string(),
            items: vec![
                QuoteItem {
                    description: "Concrete Foundation Work".to_string(),
                    quantity: 2,
                    unit_price: 100.0,
                },
                QuoteItem {
                    description: "Electrical Installation".to_string(),
                    quantity: 1,
                    unit_price: 50.0,
                },
            ],
        }
    }

    #[test]
    fn test_create_quote_applies_gst() {
        let mut state = AppState::seeded();
        let quote = state
            .create_quote(quote_payload("sent"), "2025-06-15T10:00:00+10:00".to_string())
            .unwrap();
        // 250 line total + 10% GST
        assert!((quote.total_amount.unwrap() - 275.0).abs() < 1e-9);
        assert_eq!(quote.region, "NSW");
        assert_eq!(quote.risk.as_deref(), Some("Standard"));
        assert_eq!(quote.status, "sent");
        assert_eq!(state.quotes[0].id, quote.id);
    }

    #[test]
    fn test_create_quote_requires_client() {
        let mut state = AppState::seeded();
        let mut payload = quote_payload("draft");
        payload.client = "  ".to_string();
        assert!(state.create_quote(payload, String::new()).is_err());
    }

    #[test]
    fn test_sent_quote_requires_product_and_items() {
        let mut state = AppState::seeded();

        let mut no_product = quote_payload("sent");
        no_product.product = None;
        assert!(state.create_quote(no_product, String::new()).is_err());

        let mut no_items = quote_payload("sent");
        no_items.items.clear();
        assert!(state.create_quote(no_items, String::new()).is_err());
    }

    #[test]
    fn test_draft_quote_defaults_product() {
        let mut state = AppState::seeded();
        let mut payload = quote_payload("draft");
        payload.product = None;
        payload.items.clear();
        let quote = state.create_quote(payload, String::new()).unwrap();
        assert_eq!(quote.product.as_deref(), Some("Draft Project"));
        assert_eq!(quote.total_amount, Some(0.0));
    }

    #[test]
    fn test_normalize_quote_fallback_keys() {
        let row = serde_json::json!({
            "quote_id": 42,
            "client": "Optus Networks",
            "state": "VIC",
            "createdDateTime": "2025-06-01T09:00:00Z",
            "status": "SENT",
            "total_amount": 125000.0
        });
        let quote = normalize_quote(&row).unwrap();
        assert_eq!(quote.id, 42);
        assert_eq!(quote.region, "VIC");
        assert_eq!(quote.created_on, "2025-06-01T09:00:00Z");
        assert_eq!(quote.status, "sent");
        assert_eq!(quote.total_amount, Some(125000.0));

        let bare = serde_json::json!({ "id": 7, "client": "X" });
        let quote = normalize_quote(&bare).unwrap();
        assert_eq!(quote.region, "—");
        assert_eq!(quote.status, "draft");
        assert_eq!(quote.total_amount, None);

        let no_id = serde_json::json!({ "client": "X" });
        assert!(normalize_quote(&no_id).is_none());
    }

    // ===== IMPORT/EXPORT FILE TESTS =====

    #[test]
    fn test_parse_import_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"[{"name": "Fibre Rollout", "budget": 12000.0}, {"status": "Planning"}]"#,
        )
        .unwrap();
        let records = parse_import_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Fibre Rollout"));
        assert_eq!(records[1].status.as_deref(), Some("Planning"));
    }

    #[test]
    fn test_parse_import_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        std::fs::write(&path, "name,budget,status\nFibre Rollout,12000,Planning\nPit Remediation,,\n")
            .unwrap();
        let records = parse_import_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].budget, Some(12000.0));
        assert_eq!(records[1].name.as_deref(), Some("Pit Remediation"));
        assert_eq!(records[1].budget, None);
    }

    #[test]
    fn test_parse_import_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.xml");
        std::fs::write(&path, "<projects/>").unwrap();
        assert!(parse_import_file(&path).is_err());
    }

    #[test]
    fn test_export_projects_json_round_trips() {
        let state = AppState::seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let count = write_projects_json(&state.projects, &path).unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Project> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].id, "P001");
    }

    #[test]
    fn test_performance_csv_shape() {
        let state = AppState::seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance.csv");
        write_performance_csv(&state.projects, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Project ID,Name,Status,Budget,Actual Cost,Savings"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("P001,"));
        assert!(first.ends_with("8000")); // 50000 − 42000
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_quotes_csv_shape() {
        let state = AppState::seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        let count = write_quotes_csv(&state.quotes, &path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Client Name,Region,Product,Risk,Created On,Status,Total Cost"
        );
        assert!(lines.next().unwrap().contains("Sent"));
        assert!(lines.next().unwrap().contains("Draft"));
    }

    // ===== SELECTION TESTS =====

    #[test]
    fn test_adding_same_material_accumulates_qty() {
        let mut state = AppState::seeded();
        state.add_material_selection("M02", 1);
        state.add_material_selection("M02", 1);
        assert_eq!(state.selected_materials.len(), 1);
        assert_eq!(state.selected_materials[0].qty, 2);
    }

    #[test]
    fn test_zero_qty_removes_selection() {
        let mut state = AppState::seeded();
        state.add_equipment_selection("E01", 2);
        state.update_equipment_qty("E01", 0);
        assert!(state.selected_equipment.is_empty());

        state.add_material_selection("M02", 2);
        state.update_material_qty("M02", -1);
        assert!(state.selected_materials.is_empty());
    }

    #[test]
    fn test_labour_entry_rejects_non_positive_inputs() {
        let mut state = AppState::seeded();
        let result = state.add_labour_entry(CreateLabourEntry {
            item_id: "M02".to_string(),
            item_type: ItemType::Material,
            persons: 0,
            hours: 8,
            rate: 75.0,
            description: None,
        });
        assert!(result.is_err());
        assert!(state.selected_labour.is_empty());
    }

    #[test]
    fn test_labour_for_item_filters_by_target() {
        let mut state = AppState::seeded();
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "M02".to_string(),
                item_type: ItemType::Material,
                persons: 1,
                hours: 8,
                rate: 75.0,
                description: None,
            })
            .unwrap();
        state
            .add_labour_entry(CreateLabourEntry {
                item_id: "E01".to_string(),
                item_type: ItemType::Equipment,
                persons: 1,
                hours: 4,
                rate: 65.0,
                description: None,
            })
            .unwrap();
        assert_eq!(state.labour_for_item("M02", ItemType::Material).len(), 1);
        assert_eq!(state.labour_for_item("M02", ItemType::Equipment).len(), 0);
    }

    // ===== LABOUR ROLE ADMIN TESTS =====

    #[test]
    fn test_seeded_role_ids_are_unique() {
        let state = AppState::seeded();
        let mut ids: Vec<&str> = state.labour_roles.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.labour_roles.len());
    }

    #[test]
    fn test_create_role_rejects_duplicate_type_and_state() {
        let mut state = AppState::seeded();
        let duplicate = state.create_labour_role(crate::models::CreateLabourRole {
            labour_type: "Labour Normal".to_string(),
            base_rate: 80.0,
            state: Some("NSW".to_string()),
            state_adjustment: None,
        });
        assert!(duplicate.is_err());

        // Same type in another state is a per-state rate, not a duplicate.
        let vic = state.create_labour_role(crate::models::CreateLabourRole {
            labour_type: "Labour Normal".to_string(),
            base_rate: 80.0,
            state: Some("VIC".to_string()),
            state_adjustment: None,
        });
        assert!(vic.is_ok());
        assert_eq!(engine::resolve_rate(&state.labour_roles, "Labour Normal", "VIC"), 80.0);
    }

    #[test]
    fn test_delete_labour_type_removes_all_states() {
        let mut state = AppState::seeded();
        state
            .create_labour_role(crate::models::CreateLabourRole {
                labour_type: "Labour Normal".to_string(),
                base_rate: 80.0,
                state: Some("VIC".to_string()),
                state_adjustment: None,
            })
            .unwrap();
        state.delete_labour_type("Labour Normal");
        assert!(!state
            .labour_roles
            .iter()
            .any(|r| r.labour_type == "Labour Normal"));
        assert_eq!(engine::resolve_rate(&state.labour_roles, "Labour Normal", "NSW"), 0.0);
    }
}
