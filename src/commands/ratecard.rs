use chrono::Local;
use tauri::AppHandle;

use crate::error::Error;
use crate::models::{
    CreateLabourEntry, CreateTask, ItemType, LabourEntry, Material, Project, RateCardTotals,
    RateCardView, UpdateLabourEntry,
};
use crate::state::StoreExt;

#[tauri::command]
pub fn get_rate_card(app: AppHandle) -> Result<RateCardView, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.rate_card_view())
}

#[tauri::command]
pub fn get_totals(app: AppHandle) -> Result<RateCardTotals, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.totals())
}

#[tauri::command]
pub fn add_material_to_card(app: AppHandle, id: String, qty: Option<i32>) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    if state.material_by_id(&id).is_none() {
        return Err(Error::NotFound(format!("material {}", id)).to_string());
    }
    state.add_material_selection(&id, qty.unwrap_or(1));
    Ok(())
}

/// A quantity of zero or less removes the entry from the card.
#[tauri::command]
pub fn update_card_material_qty(app: AppHandle, id: String, qty: i32) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_material_qty(&id, qty);
    Ok(())
}

#[tauri::command]
pub fn remove_material_from_card(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.remove_material_selection(&id);
    Ok(())
}

#[tauri::command]
pub fn add_equipment_to_card(app: AppHandle, id: String, qty: Option<i32>) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    if state.equipment_by_id(&id).is_none() {
        return Err(Error::NotFound(format!("equipment {}", id)).to_string());
    }
    state.add_equipment_selection(&id, qty.unwrap_or(1));
    Ok(())
}

#[tauri::command]
pub fn update_card_equipment_qty(app: AppHandle, id: String, qty: i32) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_equipment_qty(&id, qty);
    Ok(())
}

#[tauri::command]
pub fn remove_equipment_from_card(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.remove_equipment_selection(&id);
    Ok(())
}

#[tauri::command]
pub fn add_labour(app: AppHandle, entry: CreateLabourEntry) -> Result<LabourEntry, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.add_labour_entry(entry).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_labour(app: AppHandle, entry: UpdateLabourEntry) -> Result<LabourEntry, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_labour_entry(entry).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn remove_labour(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.remove_labour_entry(&id);
    Ok(())
}

#[tauri::command]
pub fn get_labour_for_item(
    app: AppHandle,
    item_id: String,
    item_type: ItemType,
) -> Result<Vec<LabourEntry>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.labour_for_item(&item_id, item_type))
}

#[tauri::command]
pub fn create_task(app: AppHandle, task: CreateTask) -> Result<Material, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let material = state.create_task(task).map_err(|e| e.to_string())?;
    log::info!("task {} created at {}", material.id, material.price);
    Ok(material)
}

/// Attach labour to the most recent task on the card, or synthesize a new
/// task material when the card has none yet.
#[tauri::command]
pub fn add_task_labour(
    app: AppHandle,
    description: Option<String>,
    persons: i32,
    hours: i32,
    labour_type: String,
    state: Option<String>,
) -> Result<LabourEntry, String> {
    let store = app.store();
    let mut app_state = store.state.lock().map_err(|e| e.to_string())?;
    let state = state.unwrap_or_else(|| "NSW".to_string());
    app_state
        .add_task_labour(
            description.as_deref().unwrap_or(""),
            persons,
            hours,
            &labour_type,
            &state,
        )
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_crane(app: AppHandle, enabled: bool, amount: f64) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.set_crane(enabled, amount);
    Ok(())
}

#[tauri::command]
pub fn set_risk(app: AppHandle, enabled: bool, percent: f64) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.set_risk(enabled, percent);
    Ok(())
}

#[tauri::command]
pub fn set_project_name(app: AppHandle, name: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.set_project_name(&name);
    Ok(())
}

/// Turn the current rate card into a project and reset the card.
#[tauri::command]
pub fn submit_project(app: AppHandle, name: Option<String>) -> Result<Project, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let today = Local::now().date_naive();
    let project = state.submit_project(name, today).map_err(|e| e.to_string())?;
    log::info!("project {} submitted with budget {}", project.id, project.budget);
    Ok(project)
}
