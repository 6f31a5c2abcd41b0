use std::path::Path;

use chrono::Local;
use tauri::AppHandle;

use crate::models::{OverallStats, Project, ProjectImport, UpdateProject};
use crate::state::StoreExt;

#[tauri::command]
pub fn get_projects(
    app: AppHandle,
    search: Option<String>,
    status: Option<String>,
) -> Result<Vec<Project>, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.filtered_projects(search.as_deref(), status.as_deref()))
}

#[tauri::command]
pub fn new_project(app: AppHandle) -> Result<Project, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.new_project(Local::now().date_naive()))
}

#[tauri::command]
pub fn update_project(app: AppHandle, project: UpdateProject) -> Result<Project, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.update_project(project).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_project(app: AppHandle, id: String) -> Result<(), String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    state.delete_project(&id);
    Ok(())
}

#[tauri::command]
pub fn import_projects(
    app: AppHandle,
    records: Vec<ProjectImport>,
) -> Result<Vec<Project>, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let imported = state.import_projects(records, Local::now().date_naive());
    log::info!("imported {} projects", imported.len());
    Ok(imported)
}

/// Parse a `.json` (array of records) or `.csv` (header row) file into import
/// records. Parse failures leave the project list untouched.
pub fn parse_import_file(path: &Path) -> Result<Vec<ProjectImport>, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "csv" => {
            let mut reader = csv::Reader::from_reader(content.as_bytes());
            reader
                .deserialize()
                .collect::<Result<Vec<ProjectImport>, _>>()
                .map_err(|e| e.to_string())
        }
        other => Err(format!("Unsupported import format: .{}", other)),
    }
}

#[tauri::command]
pub fn import_projects_from_file(app: AppHandle, path: String) -> Result<Vec<Project>, String> {
    let records = parse_import_file(Path::new(&path))?;
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let imported = state.import_projects(records, Local::now().date_naive());
    log::info!("imported {} projects from {}", imported.len(), path);
    Ok(imported)
}

/// Flat JSON projection of a project list, written to `path`. Returns the
/// number of exported records.
pub fn write_projects_json(projects: &[Project], path: &Path) -> Result<usize, String> {
    let json = serde_json::to_string_pretty(projects).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())?;
    Ok(projects.len())
}

pub fn write_performance_csv(projects: &[Project], path: &Path) -> Result<usize, String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer
        .write_record(["Project ID", "Name", "Status", "Budget", "Actual Cost", "Savings"])
        .map_err(|e| e.to_string())?;
    for p in projects {
        writer
            .write_record([
                p.id.clone(),
                p.name.clone(),
                p.status.clone(),
                p.budget.to_string(),
                p.actual_cost.to_string(),
                (p.budget - p.actual_cost).to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(projects.len())
}

#[tauri::command]
pub fn export_projects(app: AppHandle, path: String) -> Result<usize, String> {
    let projects = {
        let store = app.store();
        let state = store.state.lock().map_err(|e| e.to_string())?;
        state.projects.clone()
    };
    let count = write_projects_json(&projects, Path::new(&path))?;
    log::info!("exported {} projects to {}", count, path);
    Ok(count)
}

#[tauri::command]
pub fn export_performance_csv(app: AppHandle, path: String) -> Result<usize, String> {
    let projects = {
        let store = app.store();
        let state = store.state.lock().map_err(|e| e.to_string())?;
        state.projects.clone()
    };
    write_performance_csv(&projects, Path::new(&path))
}

#[tauri::command]
pub fn get_overall_stats(app: AppHandle) -> Result<OverallStats, String> {
    let store = app.store();
    let state = store.state.lock().map_err(|e| e.to_string())?;
    Ok(state.overall_stats())
}
