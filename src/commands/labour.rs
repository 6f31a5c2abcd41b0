use crate::engine;
use crate::models::{CreateLabourRole, LabourRole, UpdateLabourRole};
use crate::state::StoreExt;
use tauri::AppHandle;

#[tauri::command]
pub fn get_labour_roles(app: AppHandle) -> Result<Vec<LabourRole>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.labour_roles.clone())
}

#[tauri::command]
pub fn create_labour_role(app: AppHandle, role: CreateLabourRole) -> Result<LabourRole, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.create_labour_role(role).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_labour_role(app: AppHandle, role: UpdateLabourRole) -> Result<LabourRole, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_labour_role(role).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_labour_role(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.delete_labour_role(&id);
    Ok(())
}

/// Removes every role carrying the given type, across all states.
#[tauri::command]
pub fn delete_labour_type(app: AppHandle, labour_type: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.delete_labour_type(&labour_type);
    Ok(())
}

#[tauri::command]
pub fn get_labour_types(app: AppHandle) -> Result<Vec<String>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.labour_types())
}

/// Effective hourly rate for a (type, state) pair. 0.0 means the type is not
/// configured; task creation is blocked on a zero rate.
#[tauri::command]
pub fn resolve_labour_rate(
    app: AppHandle,
    labour_type: String,
    state: Option<String>,
) -> Result<f64, String> {
    let store = app.store();
    let app_state = store.state.lock().map_err(|e| e.to_string())?;
    let state = state.unwrap_or_else(|| "NSW".to_string());
    Ok(engine::resolve_rate(
        &app_state.labour_roles,
        &labour_type,
        &state,
    ))
}
