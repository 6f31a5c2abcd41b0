use crate::models::{
    CreateEquipment, CreateMaterial, Equipment, Material, UpdateEquipment, UpdateMaterial,
};
use crate::state::StoreExt;
use tauri::AppHandle;

#[tauri::command]
pub fn get_materials(app: AppHandle, search: Option<String>) -> Result<Vec<Material>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.filtered_materials(search.as_deref()))
}

#[tauri::command]
pub fn create_material(app: AppHandle, material: CreateMaterial) -> Result<Material, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let material = state.create_material(material);
    log::info!("material {} added to catalog", material.id);
    Ok(material)
}

#[tauri::command]
pub fn update_material(app: AppHandle, material: UpdateMaterial) -> Result<Material, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_material(material).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_material(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.delete_material(&id);
    Ok(())
}

#[tauri::command]
pub fn get_equipment(app: AppHandle, search: Option<String>) -> Result<Vec<Equipment>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.filtered_equipment(search.as_deref()))
}

#[tauri::command]
pub fn create_equipment(app: AppHandle, equipment: CreateEquipment) -> Result<Equipment, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let equipment = state.create_equipment(equipment);
    log::info!("equipment {} added to catalog", equipment.id);
    Ok(equipment)
}

#[tauri::command]
pub fn update_equipment(app: AppHandle, equipment: UpdateEquipment) -> Result<Equipment, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_equipment(equipment).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_equipment(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.delete_equipment(&id);
    Ok(())
}
