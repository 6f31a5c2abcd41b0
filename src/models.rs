use serde::{Deserialize, Serialize};

/// Discriminant between real catalog materials and synthetic task materials
/// created by the task builder. Task materials keep `sales_part_no = "CUSTOM"`
/// as display data, but aggregation branches on this tag.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Catalog,
    Task,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Material {
    pub id: String,
    pub sales_part_no: String,
    pub description: String,
    pub site: String,
    pub price: f64,
    pub image: Option<String>,
    #[serde(default)]
    pub kind: MaterialKind,
}

impl Material {
    pub fn is_task(&self) -> bool {
        self.kind == MaterialKind::Task
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMaterial {
    pub sales_part_no: String,
    pub description: String,
    pub site: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMaterial {
    pub id: String,
    pub sales_part_no: String,
    pub description: String,
    pub site: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub site: String,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    pub category: String,
    pub site: String,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEquipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub site: String,
    pub price: f64,
}

/// Admin-configured pay rate for a labour type in a given state.
/// Several roles may share a `labour_type` across different states; ids are
/// unique within the list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabourRole {
    pub id: String,
    #[serde(rename = "type")]
    pub labour_type: String,
    pub base_rate: f64,
    pub state: String,
    pub state_adjustment: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLabourRole {
    #[serde(rename = "type")]
    pub labour_type: String,
    pub base_rate: f64,
    pub state: Option<String>,
    pub state_adjustment: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLabourRole {
    pub id: String,
    #[serde(rename = "type")]
    pub labour_type: String,
    pub base_rate: f64,
    pub state: String,
    pub state_adjustment: f64,
}

/// A material or equipment pick on the active rate card.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SelectionEntry {
    pub id: String,
    pub qty: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Material,
    Equipment,
}

/// An ad-hoc labour line attached to a selected material or equipment item.
/// Cost is derived, never stored: `persons × hours × rate`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabourEntry {
    pub id: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub persons: i32,
    pub hours: i32,
    pub rate: f64,
    pub description: String,
}

impl LabourEntry {
    pub fn cost(&self) -> f64 {
        self.persons as f64 * self.hours as f64 * self.rate
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLabourEntry {
    pub item_id: String,
    pub item_type: ItemType,
    pub persons: i32,
    pub hours: i32,
    pub rate: f64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLabourEntry {
    pub id: String,
    pub persons: i32,
    pub hours: i32,
    pub rate: f64,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTask {
    pub description: String,
    pub persons: i32,
    pub hours: i32,
    pub labour_type: String,
    pub state: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: String, // Planning / In Progress / Completed / On Hold / Cancelled / Pending
    pub budget: f64,
    pub actual_cost: f64,
    pub start_date: String, // YYYY-MM-DD
    pub end_date: String,   // YYYY-MM-DD
    pub description: String,
    pub manager: String,
    pub progress: i32,
    pub priority: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProject {
    pub id: String,
    pub name: String,
    pub status: String,
    pub budget: f64,
    pub actual_cost: f64,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub manager: String,
    pub progress: i32,
    pub priority: String,
    pub category: String,
}

/// Partial project-shaped record from a bulk import. Every field is optional;
/// the importer fills defaults.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectImport {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub progress: Option<i32>,
    pub manager: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PriceChange,
    Deadline,
    Overdue,
    BudgetOverrun,
    LabourOverrun,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub time: String,
    pub read: bool,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labour_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrun_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Quote {
    pub id: i64,
    pub client: String,
    pub region: String,
    pub product: Option<String>,
    pub risk: Option<String>,
    pub created_on: String, // ISO 8601
    pub status: String,     // "draft" or "sent"
    pub total_amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteItem {
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuote {
    pub client: String,
    pub region: Option<String>,
    pub product: Option<String>,
    pub risk: Option<String>,
    pub status: String, // "draft" or "sent"
    pub items: Vec<QuoteItem>,
}

/// Derived cost figures for the active rate card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RateCardTotals {
    pub materials: f64,
    pub tasks: f64,
    pub equipment: f64,
    pub labour: f64,
    pub crane_fee: f64,
    pub risk_amount: f64,
    pub external: f64,
    pub total: f64,
}

/// Everything the rate-card view renders: current picks plus derived totals.
#[derive(Debug, Serialize, Deserialize)]
pub struct RateCardView {
    pub selected_materials: Vec<SelectionEntry>,
    pub selected_equipment: Vec<SelectionEntry>,
    pub selected_labour: Vec<LabourEntry>,
    pub crane_enabled: bool,
    pub crane_amount: f64,
    pub risk_enabled: bool,
    pub risk_percent: f64,
    pub project_name: String,
    pub totals: RateCardTotals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_projects: i32,
    pub completed_projects: i32,
    pub completion_rate: f64,
    pub total_budget: f64,
    pub total_actual_cost: f64,
    pub total_savings: f64,
    pub avg_efficiency: f64,
}
