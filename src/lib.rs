mod alerts;
mod commands;
mod engine;
mod error;
mod models;
mod state;

#[cfg(test)]
mod tests;

use commands::{catalog, labour, notifications, projects, quotes, ratecard};
use state::AppData;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Seeded in-memory state; nothing is persisted across runs.
            app.manage(AppData::new());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Catalog
            catalog::get_materials,
            catalog::create_material,
            catalog::update_material,
            catalog::delete_material,
            catalog::get_equipment,
            catalog::create_equipment,
            catalog::update_equipment,
            catalog::delete_equipment,
            // Labour roles
            labour::get_labour_roles,
            labour::create_labour_role,
            labour::update_labour_role,
            labour::delete_labour_role,
            labour::delete_labour_type,
            labour::get_labour_types,
            labour::resolve_labour_rate,
            // Rate card
            ratecard::get_rate_card,
            ratecard::get_totals,
            ratecard::add_material_to_card,
            ratecard::update_card_material_qty,
            ratecard::remove_material_from_card,
            ratecard::add_equipment_to_card,
            ratecard::update_card_equipment_qty,
            ratecard::remove_equipment_from_card,
            ratecard::add_labour,
            ratecard::update_labour,
            ratecard::remove_labour,
            ratecard::get_labour_for_item,
            ratecard::create_task,
            ratecard::add_task_labour,
            ratecard::set_crane,
            ratecard::set_risk,
            ratecard::set_project_name,
            ratecard::submit_project,
            // Projects
            projects::get_projects,
            projects::new_project,
            projects::update_project,
            projects::delete_project,
            projects::import_projects,
            projects::import_projects_from_file,
            projects::export_projects,
            projects::export_performance_csv,
            projects::get_overall_stats,
            // Quotes
            quotes::get_quotes,
            quotes::create_quote,
            quotes::export_quotes_csv,
            // Notifications
            notifications::get_notifications,
            notifications::dismiss_notification,
            notifications::mark_notification_read,
            notifications::run_alert_scan,
            notifications::start_alert_monitor,
            notifications::stop_alert_monitor,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
