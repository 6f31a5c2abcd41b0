use chrono::Local;
use tauri::AppHandle;

use crate::alerts;
use crate::models::Notification;
use crate::state::StoreExt;

#[tauri::command]
pub fn get_notifications(app: AppHandle) -> Result<Vec<Notification>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.notifications.clone())
}

#[tauri::command]
pub fn dismiss_notification(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.dismiss_notification(&id);
    Ok(())
}

#[tauri::command]
pub fn mark_notification_read(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.mark_notification_read(&id).map_err(|e| e.to_string())
}

/// One manual evaluation cycle; returns the notification list afterwards.
#[tauri::command]
pub fn run_alert_scan(app: AppHandle) -> Result<Vec<Notification>, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let active = alerts::run_scan(&state, Local::now().date_naive());
    state.apply_scan(active);
    Ok(state.notifications.clone())
}

/// Start the periodic scan when the notifications view mounts.
#[tauri::command]
pub fn start_alert_monitor(app: AppHandle) -> Result<(), String> {
    alerts::start(app)
}

/// Cancel the periodic scan when the notifications view unmounts.
#[tauri::command]
pub fn stop_alert_monitor(app: AppHandle) -> Result<(), String> {
    alerts::stop(app.store())
}
