use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate};
use tauri::AppHandle;

use crate::alerts;
use crate::engine;
use crate::error::{Error, Result};
use crate::models::{
    CreateEquipment, CreateLabourEntry, CreateLabourRole, CreateMaterial, CreateQuote, CreateTask,
    Equipment, ItemType, LabourEntry, LabourRole, Material, MaterialKind, Notification,
    NotificationKind, OverallStats, Project, ProjectImport, Quote, RateCardTotals, RateCardView,
    SelectionEntry, UpdateEquipment, UpdateLabourEntry, UpdateLabourRole, UpdateMaterial,
    UpdateProject,
};

pub struct AppData {
    pub state: Mutex<AppState>,
    pub alert_task: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
}

impl AppData {
    pub fn new() -> Self {
        AppData {
            state: Mutex::new(AppState::seeded()),
            alert_task: Mutex::new(None),
        }
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole application state: catalog, active rate-card selection,
/// projects, quotes and the rolling notification list. One instance lives in
/// Tauri managed state behind a mutex; commands lock it, derivations in
/// `engine`/`alerts` only ever see snapshots.
pub struct AppState {
    id_counter: u64,
    quote_counter: i64,
    pub materials: Vec<Material>,
    pub equipment: Vec<Equipment>,
    pub labour_roles: Vec<LabourRole>,
    pub selected_materials: Vec<SelectionEntry>,
    pub selected_equipment: Vec<SelectionEntry>,
    pub selected_labour: Vec<LabourEntry>,
    pub crane_enabled: bool,
    pub crane_amount: f64,
    pub risk_enabled: bool,
    pub risk_percent: f64,
    pub project_name: String,
    pub projects: Vec<Project>,
    pub quotes: Vec<Quote>,
    pub notifications: Vec<Notification>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            // Fresh ids start well above the seeded ranges.
            id_counter: 1000,
            quote_counter: 100,
            materials: Vec::new(),
            equipment: Vec::new(),
            labour_roles: Vec::new(),
            selected_materials: Vec::new(),
            selected_equipment: Vec::new(),
            selected_labour: Vec::new(),
            crane_enabled: false,
            crane_amount: 0.0,
            risk_enabled: false,
            risk_percent: 10.0,
            project_name: String::new(),
            projects: Vec::new(),
            quotes: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn seeded() -> Self {
        let mut state = Self::new();
        state.materials = seed_materials();
        state.equipment = seed_equipment();
        state.labour_roles = seed_labour_roles();
        state.projects = seed_projects();
        state.quotes = seed_quotes();
        state
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.id_counter += 1;
        format!("{}{}", prefix, self.id_counter)
    }

    // ----- catalog lookups -----

    pub fn material_by_id(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    /// Non-task catalog materials, optionally filtered by a search term across
    /// id, description, part number and site.
    pub fn filtered_materials(&self, search: Option<&str>) -> Vec<Material> {
        let term = search.unwrap_or("").trim().to_lowercase();
        self.materials
            .iter()
            .filter(|m| !m.is_task())
            .filter(|m| {
                term.is_empty()
                    || m.id.to_lowercase().contains(&term)
                    || m.description.to_lowercase().contains(&term)
                    || m.sales_part_no.to_lowercase().contains(&term)
                    || m.site.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    pub fn filtered_equipment(&self, search: Option<&str>) -> Vec<Equipment> {
        let term = search.unwrap_or("").trim().to_lowercase();
        self.equipment
            .iter()
            .filter(|e| {
                term.is_empty()
                    || e.id.to_lowercase().contains(&term)
                    || e.name.to_lowercase().contains(&term)
                    || e.category.to_lowercase().contains(&term)
                    || e.site.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    // ----- catalog CRUD -----

    pub fn create_material(&mut self, new: CreateMaterial) -> Material {
        let material = Material {
            id: self.fresh_id("M"),
            sales_part_no: new.sales_part_no,
            description: new.description,
            site: new.site,
            price: new.price,
            image: new.image,
            kind: MaterialKind::Catalog,
        };
        self.materials.push(material.clone());
        material
    }

    pub fn update_material(&mut self, upd: UpdateMaterial) -> Result<Material> {
        let idx = self
            .materials
            .iter()
            .position(|m| m.id == upd.id)
            .ok_or_else(|| Error::NotFound(format!("material {}", upd.id)))?;
        let old_price = self.materials[idx].price;
        if old_price != upd.price {
            self.track_price_change("material", &upd.id, old_price, upd.price, &upd.description);
        }
        let material = &mut self.materials[idx];
        material.sales_part_no = upd.sales_part_no;
        material.description = upd.description;
        material.site = upd.site;
        material.price = upd.price;
        material.image = upd.image;
        Ok(material.clone())
    }

    /// Selections referencing the deleted id are left in place and degrade to
    /// a zero price contribution in the aggregates.
    pub fn delete_material(&mut self, id: &str) {
        self.materials.retain(|m| m.id != id);
    }

    pub fn create_equipment(&mut self, new: CreateEquipment) -> Equipment {
        let equipment = Equipment {
            id: self.fresh_id("E"),
            name: new.name,
            category: new.category,
            site: new.site,
            price: new.price,
        };
        self.equipment.push(equipment.clone());
        equipment
    }

    pub fn update_equipment(&mut self, upd: UpdateEquipment) -> Result<Equipment> {
        let idx = self
            .equipment
            .iter()
            .position(|e| e.id == upd.id)
            .ok_or_else(|| Error::NotFound(format!("equipment {}", upd.id)))?;
        let old_price = self.equipment[idx].price;
        if old_price != upd.price {
            self.track_price_change("equipment", &upd.id, old_price, upd.price, &upd.name);
        }
        let equipment = &mut self.equipment[idx];
        equipment.name = upd.name;
        equipment.category = upd.category;
        equipment.site = upd.site;
        equipment.price = upd.price;
        Ok(equipment.clone())
    }

    pub fn delete_equipment(&mut self, id: &str) {
        self.equipment.retain(|e| e.id != id);
    }

    // ----- labour roles -----

    pub fn create_labour_role(&mut self, new: CreateLabourRole) -> Result<LabourRole> {
        let labour_type = new.labour_type.trim().to_string();
        if labour_type.is_empty() {
            return Err(Error::Validation("Labour type is required.".into()));
        }
        let state = new.state.unwrap_or_else(|| "NSW".to_string());
        if self
            .labour_roles
            .iter()
            .any(|r| r.labour_type == labour_type && r.state == state)
        {
            return Err(Error::Validation(format!(
                "A {} rate for {} already exists.",
                labour_type, state
            )));
        }
        let role = LabourRole {
            id: self.fresh_id("LR"),
            labour_type,
            base_rate: new.base_rate,
            state,
            state_adjustment: new.state_adjustment.unwrap_or(0.0),
        };
        self.labour_roles.push(role.clone());
        Ok(role)
    }

    pub fn update_labour_role(&mut self, upd: UpdateLabourRole) -> Result<LabourRole> {
        let idx = self
            .labour_roles
            .iter()
            .position(|r| r.id == upd.id)
            .ok_or_else(|| Error::NotFound(format!("labour role {}", upd.id)))?;
        let old_rate = self.labour_roles[idx].base_rate;
        if old_rate != upd.base_rate {
            let name = format!("{} labour", self.labour_roles[idx].labour_type);
            self.track_price_change("labour", &upd.id, old_rate, upd.base_rate, &name);
        }
        let role = &mut self.labour_roles[idx];
        role.labour_type = upd.labour_type;
        role.base_rate = upd.base_rate;
        role.state = upd.state;
        role.state_adjustment = upd.state_adjustment;
        Ok(role.clone())
    }

    pub fn delete_labour_role(&mut self, id: &str) {
        self.labour_roles.retain(|r| r.id != id);
    }

    /// Removes every role carrying the given type, across all states.
    pub fn delete_labour_type(&mut self, labour_type: &str) {
        self.labour_roles.retain(|r| r.labour_type != labour_type);
    }

    pub fn labour_types(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.labour_roles
            .iter()
            .filter(|r| seen.insert(r.labour_type.clone()))
            .map(|r| r.labour_type.clone())
            .collect()
    }

    // ----- rate-card selection -----

    pub fn add_material_selection(&mut self, id: &str, qty: i32) {
        if let Some(entry) = self.selected_materials.iter_mut().find(|s| s.id == id) {
            entry.qty += qty;
        } else {
            self.selected_materials.push(SelectionEntry {
                id: id.to_string(),
                qty,
            });
        }
    }

    pub fn update_material_qty(&mut self, id: &str, qty: i32) {
        if qty <= 0 {
            self.remove_material_selection(id);
        } else if let Some(entry) = self.selected_materials.iter_mut().find(|s| s.id == id) {
            entry.qty = qty;
        }
    }

    pub fn remove_material_selection(&mut self, id: &str) {
        self.selected_materials.retain(|s| s.id != id);
    }

    pub fn add_equipment_selection(&mut self, id: &str, qty: i32) {
        if let Some(entry) = self.selected_equipment.iter_mut().find(|s| s.id == id) {
            entry.qty += qty;
        } else {
            self.selected_equipment.push(SelectionEntry {
                id: id.to_string(),
                qty,
            });
        }
    }

    pub fn update_equipment_qty(&mut self, id: &str, qty: i32) {
        if qty <= 0 {
            self.remove_equipment_selection(id);
        } else if let Some(entry) = self.selected_equipment.iter_mut().find(|s| s.id == id) {
            entry.qty = qty;
        }
    }

    pub fn remove_equipment_selection(&mut self, id: &str) {
        self.selected_equipment.retain(|s| s.id != id);
    }

    // ----- labour entries -----

    pub fn add_labour_entry(&mut self, new: CreateLabourEntry) -> Result<LabourEntry> {
        if new.persons <= 0 || new.hours <= 0 {
            return Err(Error::Validation(
                "Persons and hours must be greater than zero.".into(),
            ));
        }
        let description = match new.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => match new.item_type {
                ItemType::Material => "material installation".to_string(),
                ItemType::Equipment => "equipment installation".to_string(),
            },
        };
        let entry = LabourEntry {
            id: self.fresh_id("L"),
            item_id: new.item_id,
            item_type: new.item_type,
            persons: new.persons,
            hours: new.hours,
            rate: new.rate,
            description,
        };
        self.selected_labour.push(entry.clone());
        Ok(entry)
    }

    pub fn update_labour_entry(&mut self, upd: UpdateLabourEntry) -> Result<LabourEntry> {
        if upd.persons <= 0 || upd.hours <= 0 {
            return Err(Error::Validation(
                "Persons and hours must be greater than zero.".into(),
            ));
        }
        let entry = self
            .selected_labour
            .iter_mut()
            .find(|l| l.id == upd.id)
            .ok_or_else(|| Error::NotFound(format!("labour entry {}", upd.id)))?;
        entry.persons = upd.persons;
        entry.hours = upd.hours;
        entry.rate = upd.rate;
        entry.description = upd.description;
        Ok(entry.clone())
    }

    pub fn remove_labour_entry(&mut self, id: &str) {
        self.selected_labour.retain(|l| l.id != id);
    }

    pub fn labour_for_item(&self, item_id: &str, item_type: ItemType) -> Vec<LabourEntry> {
        self.selected_labour
            .iter()
            .filter(|l| l.item_id == item_id && l.item_type == item_type)
            .cloned()
            .collect()
    }

    // ----- task synthesis -----

    /// Materialize an ad-hoc labour charge as a synthetic task material and
    /// put it on the card with qty 1.
    pub fn create_task(&mut self, task: CreateTask) -> Result<Material> {
        let description = task.description.trim().to_string();
        let rate = engine::resolve_rate(&self.labour_roles, &task.labour_type, &task.state);
        if description.is_empty() || task.persons <= 0 || task.hours <= 0 || rate <= 0.0 {
            return Err(Error::Validation(
                "Please fill task description, persons (>0), hours (>0), and select a configured labour type."
                    .into(),
            ));
        }
        let material = self.synthesize_task_material(
            &description,
            &task.labour_type,
            task.persons,
            task.hours,
            rate,
        );
        Ok(material)
    }

    fn synthesize_task_material(
        &mut self,
        description: &str,
        labour_type: &str,
        persons: i32,
        hours: i32,
        rate: f64,
    ) -> Material {
        let price = persons as f64 * hours as f64 * rate;
        let material = Material {
            id: self.fresh_id("T"),
            sales_part_no: "CUSTOM".to_string(),
            description: format!("{} ({})", description, labour_type),
            site: "CUSTOM".to_string(),
            price,
            image: None,
            kind: MaterialKind::Task,
        };
        self.materials.push(material.clone());
        let id = material.id.clone();
        self.add_material_selection(&id, 1);
        material
    }

    /// Attach a labour entry to the most recent task on the card, creating a
    /// fresh task material first when the card has none. The reuse-or-create
    /// order decides which entity the entry lands on.
    pub fn add_task_labour(
        &mut self,
        description: &str,
        persons: i32,
        hours: i32,
        labour_type: &str,
        state: &str,
    ) -> Result<LabourEntry> {
        if persons <= 0 || hours <= 0 {
            return Err(Error::Validation(
                "Persons and hours must be greater than zero.".into(),
            ));
        }
        let rate = engine::resolve_rate(&self.labour_roles, labour_type, state);
        let last_task = self
            .selected_materials
            .iter()
            .filter(|s| self.material_by_id(&s.id).is_some_and(|m| m.is_task()))
            .next_back()
            .map(|s| s.id.clone());

        let (target_id, target_desc) = match last_task {
            Some(id) => {
                let desc = self
                    .material_by_id(&id)
                    .map(|m| m.description.clone())
                    .unwrap_or_default();
                (id, desc)
            }
            None => {
                let desc = description.trim();
                if desc.is_empty() {
                    return Err(Error::Validation(
                        "Please enter a task description first.".into(),
                    ));
                }
                let material = self.synthesize_task_material(desc, labour_type, persons, hours, rate);
                (material.id, material.description)
            }
        };

        self.add_labour_entry(CreateLabourEntry {
            item_id: target_id,
            item_type: ItemType::Material,
            persons,
            hours,
            rate,
            description: Some(format!("{} task", target_desc)),
        })
    }

    // ----- surcharges and derived totals -----

    pub fn set_crane(&mut self, enabled: bool, amount: f64) {
        self.crane_enabled = enabled;
        self.crane_amount = amount;
    }

    pub fn set_risk(&mut self, enabled: bool, percent: f64) {
        self.risk_enabled = enabled;
        self.risk_percent = percent;
    }

    pub fn set_project_name(&mut self, name: &str) {
        self.project_name = name.to_string();
    }

    pub fn totals(&self) -> RateCardTotals {
        let materials = engine::material_total(&self.materials, &self.selected_materials);
        let tasks = engine::tasks_total(&self.materials, &self.selected_materials);
        let equipment = engine::equipment_total(&self.equipment, &self.selected_equipment);
        let labour = engine::labour_total(&self.selected_labour);
        let crane_fee = engine::crane_fee(self.crane_enabled, self.crane_amount);
        let mut risk_base = materials + equipment + labour + crane_fee;
        if engine::RISK_APPLIES_TO_TASKS {
            risk_base += tasks;
        }
        let risk_amount = engine::risk_amount(self.risk_enabled, self.risk_percent, risk_base);
        let external = crane_fee + risk_amount;
        RateCardTotals {
            materials,
            tasks,
            equipment,
            labour,
            crane_fee,
            risk_amount,
            external,
            total: materials + tasks + equipment + labour + external,
        }
    }

    pub fn rate_card_view(&self) -> RateCardView {
        RateCardView {
            selected_materials: self.selected_materials.clone(),
            selected_equipment: self.selected_equipment.clone(),
            selected_labour: self.selected_labour.clone(),
            crane_enabled: self.crane_enabled,
            crane_amount: self.crane_amount,
            risk_enabled: self.risk_enabled,
            risk_percent: self.risk_percent,
            project_name: self.project_name.clone(),
            totals: self.totals(),
        }
    }

    // ----- project projection and CRUD -----

    /// Turn the current rate card into a project, then reset the card.
    pub fn submit_project(&mut self, name: Option<String>, today: NaiveDate) -> Result<Project> {
        let total = self.totals().total;
        if total == 0.0 {
            return Err(Error::Validation(
                "Please add materials, equipment, or labour before submitting the project.".into(),
            ));
        }
        let name = name
            .unwrap_or_else(|| self.project_name.clone())
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(Error::Validation("Project name is required.".into()));
        }
        let project = Project {
            id: self.fresh_id("P"),
            name,
            status: "Planning".to_string(),
            budget: total,
            actual_cost: 0.0,
            start_date: today.to_string(),
            end_date: (today + Duration::days(90)).to_string(),
            description: format!(
                "Project created from rate card calculation. Total budget: {}",
                engine::format_price(total)
            ),
            manager: "Project Manager".to_string(),
            progress: 0,
            priority: "Medium".to_string(),
            category: "Rate Card Project".to_string(),
        };
        self.projects.insert(0, project.clone());
        self.clear_rate_card();
        Ok(project)
    }

    fn clear_rate_card(&mut self) {
        self.selected_materials.clear();
        self.selected_equipment.clear();
        self.selected_labour.clear();
        self.crane_enabled = false;
        self.crane_amount = 0.0;
        self.risk_enabled = false;
        self.risk_percent = 10.0;
        self.project_name.clear();
    }

    pub fn new_project(&mut self, today: NaiveDate) -> Project {
        self.id_counter += 1;
        let project = Project {
            id: format!("P{}", self.id_counter),
            name: format!("New Project {}", self.id_counter),
            status: "Planning".to_string(),
            budget: 50000.0,
            actual_cost: 0.0,
            start_date: today.to_string(),
            end_date: (today + Duration::days(30)).to_string(),
            description: "This is a newly created project. Click Edit to modify details."
                .to_string(),
            manager: "New Manager".to_string(),
            progress: 0,
            priority: "Medium".to_string(),
            category: "Development".to_string(),
        };
        self.projects.insert(0, project.clone());
        project
    }

    pub fn update_project(&mut self, upd: UpdateProject) -> Result<Project> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == upd.id)
            .ok_or_else(|| Error::NotFound(format!("project {}", upd.id)))?;
        project.name = upd.name;
        project.status = upd.status;
        project.budget = upd.budget;
        project.actual_cost = upd.actual_cost;
        project.start_date = upd.start_date;
        project.end_date = upd.end_date;
        project.description = upd.description;
        project.manager = upd.manager;
        project.progress = upd.progress;
        project.priority = upd.priority;
        project.category = upd.category;
        Ok(project.clone())
    }

    pub fn delete_project(&mut self, id: &str) {
        self.projects.retain(|p| p.id != id);
    }

    pub fn filtered_projects(&self, search: Option<&str>, status: Option<&str>) -> Vec<Project> {
        let term = search.unwrap_or("").trim().to_lowercase();
        let status = status.unwrap_or("").trim().to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.id.to_lowercase().contains(&term)
                    || p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.manager.to_lowercase().contains(&term)
            })
            .filter(|p| status.is_empty() || p.status.to_lowercase().contains(&status))
            .cloned()
            .collect()
    }

    /// Map partial import records to fully-defaulted projects and append them.
    pub fn import_projects(&mut self, records: Vec<ProjectImport>, today: NaiveDate) -> Vec<Project> {
        let mut imported = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let id = match record.id {
                Some(id) if !id.trim().is_empty() => id,
                _ => self.fresh_id("P"),
            };
            let project = Project {
                id,
                name: record
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| format!("Imported Product {}", index + 1)),
                status: record.status.unwrap_or_else(|| "Pending".to_string()),
                budget: record.budget.unwrap_or(0.0),
                actual_cost: record.actual_cost.unwrap_or(0.0),
                progress: record.progress.unwrap_or(0),
                manager: record.manager.unwrap_or_else(|| "Admin".to_string()),
                start_date: record.start_date.unwrap_or_else(|| today.to_string()),
                end_date: record
                    .end_date
                    .unwrap_or_else(|| (today + Duration::days(30)).to_string()),
                description: record.description.unwrap_or_default(),
                priority: record.priority.unwrap_or_else(|| "Medium".to_string()),
                category: record.category.unwrap_or_else(|| "General".to_string()),
            };
            self.projects.push(project.clone());
            imported.push(project);
        }
        imported
    }

    pub fn overall_stats(&self) -> OverallStats {
        let total_projects = self.projects.len() as i32;
        let completed_projects = self
            .projects
            .iter()
            .filter(|p| p.status.eq_ignore_ascii_case("completed"))
            .count() as i32;
        let completion_rate = if total_projects > 0 {
            completed_projects as f64 / total_projects as f64 * 100.0
        } else {
            0.0
        };
        let total_budget: f64 = self.projects.iter().map(|p| p.budget).sum();
        let total_actual_cost: f64 = self.projects.iter().map(|p| p.actual_cost).sum();
        let avg_efficiency = if total_budget > 0.0 {
            (total_budget - total_actual_cost) / total_budget * 100.0
        } else {
            0.0
        };
        OverallStats {
            total_projects,
            completed_projects,
            completion_rate,
            total_budget,
            total_actual_cost,
            total_savings: total_budget - total_actual_cost,
            avg_efficiency,
        }
    }

    // ----- quotes -----

    pub fn create_quote(&mut self, new: CreateQuote, created_on: String) -> Result<Quote> {
        if new.client.trim().is_empty() {
            return Err(Error::Validation("Please enter a client name.".into()));
        }
        let status = new.status.to_lowercase();
        if status != "draft" && status != "sent" {
            return Err(Error::Validation(format!("Unknown quote status: {}", status)));
        }
        let product = new.product.filter(|p| !p.trim().is_empty());
        if status == "sent" {
            if product.is_none() {
                return Err(Error::Validation("Please enter a project name.".into()));
            }
            if new.items.is_empty() {
                return Err(Error::Validation(
                    "Please add at least one quote item.".into(),
                ));
            }
        }
        let subtotal: f64 = new
            .items
            .iter()
            .map(|i| i.quantity as f64 * i.unit_price)
            .sum();
        // 10% GST on top of the line items.
        let total = subtotal * 1.1;
        self.quote_counter += 1;
        let quote = Quote {
            id: self.quote_counter,
            client: new.client.trim().to_string(),
            region: new.region.unwrap_or_else(|| "NSW".to_string()),
            product: product.or_else(|| Some("Draft Project".to_string())),
            risk: new.risk.or_else(|| Some("Standard".to_string())),
            created_on,
            status,
            total_amount: Some(total),
        };
        self.quotes.insert(0, quote.clone());
        Ok(quote)
    }

    // ----- notifications -----

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
        self.notifications.truncate(alerts::NOTIFICATION_CAP);
    }

    pub fn track_price_change(
        &mut self,
        item_type: &str,
        item_id: &str,
        old_price: f64,
        new_price: f64,
        name: &str,
    ) {
        self.id_counter += 1;
        let id = format!("PRICE_{}", self.id_counter);
        if let Some(n) = alerts::price_change(id, item_type, item_id, old_price, new_price, name) {
            self.push_notification(n);
        }
    }

    /// Merge the result of a periodic scan into the rolling list: still-active
    /// alerts are updated in place (keeping their read flag), cleared
    /// conditions expire, new ones go to the front. Price-change
    /// notifications are event-scoped and never expired here.
    pub fn apply_scan(&mut self, active: Vec<Notification>) {
        let active_ids: HashSet<&str> = active.iter().map(|n| n.id.as_str()).collect();
        self.notifications.retain(|n| {
            n.kind == NotificationKind::PriceChange || active_ids.contains(n.id.as_str())
        });
        for alert in active {
            if let Some(existing) = self.notifications.iter_mut().find(|n| n.id == alert.id) {
                let read = existing.read;
                *existing = alert;
                existing.read = read;
            } else {
                self.notifications.insert(0, alert);
            }
        }
        self.notifications.truncate(alerts::NOTIFICATION_CAP);
    }

    pub fn dismiss_notification(&mut self, id: &str) {
        self.notifications.retain(|n| n.id != id);
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("notification {}", id)))?;
        notification.read = true;
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ----- seed data -----

fn mat(id: &str, part: &str, desc: &str, price: f64) -> Material {
    Material {
        id: id.to_string(),
        sales_part_no: part.to_string(),
        description: desc.to_string(),
        site: "3DT01".to_string(),
        price,
        image: None,
        kind: MaterialKind::Catalog,
    }
}

fn seed_materials() -> Vec<Material> {
    vec![
        mat("M01", "10-DG094", "10kVA Perkins Enclosed Generator (Elcos)", 4545.45),
        mat("M02", "2-1671163-1", "12 PORT CONSOLIDATION PORT", 132.00),
        mat("M03", "ATCB-B01-002", "AISG RET Control Cable 2m", 37.32),
        mat("M04", "ATCB-B01-030", "AISG RET Control Cable 30m", 174.73),
        mat("M05", "ATCB-B01-Y-C30", "AISG RET Control Cable Two-way Splitter", 53.19),
        mat("M06", "BA48TL200", "Battery 9.6kWh FZSoNick 48TL200", 11349.00),
        mat("M07", "CA0001-2.0", "Telstra Power Cable 2m Length P6309-B6320", 2.95),
        mat("M08", "CA0002", "Trident DC Cable Suit Ericsson Radio Unit", 47.00),
        mat("M09", "CACG020ARM", "Cable Gland 20mm Armoured IP66/68 Suit 14.7-17mm2 Cable", 25.00),
        mat("M10", "CV00001-48DC", "Decon Eco Cooling Unit D355 48v DC", 1113.00),
        mat("M11", "EC-DDR-30L-24", "Mean Well DC to DC Converter 24-48 VDC", 46.80),
        mat("M12", "FSJ4-50B", "STD.JACKET 50-OHM 1/2\" FSJ CABLE", 3.81),
        mat("M13", "GO-2300P", "2.0 kVA / 2.0 kW Generator (Model GO-2300P)", 550.00),
        mat("M14", "PLS6-C40-MW", "MCB 6KA C CURVE 40A 1P", 6.50),
        mat("M15", "RAFSB119BR", "Fibre Cable Support Bracket 1RU 19\" Black Ripple", 26.00),
        mat("M16", "RGL-072", "5G Internal SPD", 1325.00),
    ]
}

fn seed_equipment() -> Vec<Equipment> {
    let equip = |id: &str, name: &str, category: &str, price: f64| Equipment {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        site: "3DT01".to_string(),
        price,
    };
    vec![
        equip("E01", "Crane 50T", "Heavy Equipment", 5000.00),
        equip("E02", "Excavator", "Heavy Equipment", 3000.00),
        equip("E03", "Generator Set", "Power Equipment", 2000.00),
        equip("E04", "Welding Machine", "Tools", 800.00),
        equip("E05", "Compressor", "Tools", 1200.00),
    ]
}

fn seed_labour_roles() -> Vec<LabourRole> {
    let role = |id: &str, labour_type: &str, base_rate: f64| LabourRole {
        id: id.to_string(),
        labour_type: labour_type.to_string(),
        base_rate,
        state: "NSW".to_string(),
        state_adjustment: 0.0,
    };
    vec![
        role("LR1", "Labour Normal", 75.0),
        role("LR2", "Site visit", 65.0),
        role("LR3", "Mobilisation", 80.0),
        role("LR4", "Stand down", 50.0),
        role("LR5", "Inductions", 45.0),
        role("LR6", "Test/Commission", 95.0),
        role("LR7", "Documentation", 70.0),
        role("LR8", "OT", 110.0),
    ]
}

fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "P001".to_string(),
            name: "Site A Construction".to_string(),
            status: "In Progress".to_string(),
            budget: 50000.0,
            actual_cost: 42000.0,
            start_date: "2024-01-15".to_string(),
            end_date: "2024-06-30".to_string(),
            description: "Construction of new office building with modern facilities".to_string(),
            manager: "John Smith".to_string(),
            progress: 75,
            priority: "High".to_string(),
            category: "Construction".to_string(),
        },
        Project {
            id: "P002".to_string(),
            name: "Equipment Installation".to_string(),
            status: "Completed".to_string(),
            budget: 25000.0,
            actual_cost: 23000.0,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-15".to_string(),
            description: "Installation of new manufacturing equipment".to_string(),
            manager: "Sarah Johnson".to_string(),
            progress: 100,
            priority: "Medium".to_string(),
            category: "Installation".to_string(),
        },
        Project {
            id: "P003".to_string(),
            name: "Infrastructure Setup".to_string(),
            status: "Planning".to_string(),
            budget: 75000.0,
            actual_cost: 0.0,
            start_date: "2024-07-01".to_string(),
            end_date: "2024-12-31".to_string(),
            description: "Setting up new infrastructure for expansion".to_string(),
            manager: "Mike Wilson".to_string(),
            progress: 15,
            priority: "High".to_string(),
            category: "Infrastructure".to_string(),
        },
    ]
}

fn seed_quotes() -> Vec<Quote> {
    let now = Local::now();
    vec![
        Quote {
            id: 1,
            client: "Telstra InfraCo".to_string(),
            region: "NSW".to_string(),
            product: Some("Site A Construction".to_string()),
            risk: Some("Standard".to_string()),
            created_on: (now - Duration::days(1)).to_rfc3339(),
            status: "sent".to_string(),
            total_amount: Some(125000.0),
        },
        Quote {
            id: 2,
            client: "Optus Networks".to_string(),
            region: "VIC".to_string(),
            product: Some("Equipment Installation".to_string()),
            risk: Some("High".to_string()),
            created_on: (now - Duration::days(2)).to_rfc3339(),
            status: "draft".to_string(),
            total_amount: Some(85000.0),
        },
    ]
}

use tauri::Manager;

pub trait StoreExt {
    fn store(&self) -> &AppData;
}

impl StoreExt for AppHandle {
    fn store(&self) -> &AppData {
        self.state::<AppData>().inner()
    }
}
