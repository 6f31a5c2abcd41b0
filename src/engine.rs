//! Pure cost-derivation functions for the rate card. Everything here takes
//! snapshots and returns numbers; no mutation anywhere.

use crate::models::{Equipment, LabourEntry, LabourRole, Material, SelectionEntry};

/// Tasks are excluded from the risk base: risk applies on top of materials,
/// equipment, labour and the crane fee only.
pub const RISK_APPLIES_TO_TASKS: bool = false;

fn material_by_id<'a>(materials: &'a [Material], id: &str) -> Option<&'a Material> {
    materials.iter().find(|m| m.id == id)
}

fn equipment_by_id<'a>(equipment: &'a [Equipment], id: &str) -> Option<&'a Equipment> {
    equipment.iter().find(|e| e.id == id)
}

/// Sum of price × qty over selected non-task materials. Selections pointing
/// at a missing catalog id contribute 0 so a deleted item never breaks an
/// open rate card.
pub fn material_total(materials: &[Material], selections: &[SelectionEntry]) -> f64 {
    selections
        .iter()
        .filter_map(|s| material_by_id(materials, &s.id).map(|m| (m, s.qty)))
        .filter(|(m, _)| !m.is_task())
        .map(|(m, qty)| m.price * qty as f64)
        .sum()
}

/// Sum of price × qty over selected task materials. Together with
/// `material_total` this partitions the material selection list.
pub fn tasks_total(materials: &[Material], selections: &[SelectionEntry]) -> f64 {
    selections
        .iter()
        .filter_map(|s| material_by_id(materials, &s.id).map(|m| (m, s.qty)))
        .filter(|(m, _)| m.is_task())
        .map(|(m, qty)| m.price * qty as f64)
        .sum()
}

pub fn equipment_total(equipment: &[Equipment], selections: &[SelectionEntry]) -> f64 {
    selections
        .iter()
        .filter_map(|s| equipment_by_id(equipment, &s.id).map(|e| e.price * s.qty as f64))
        .sum()
}

pub fn labour_total(entries: &[LabourEntry]) -> f64 {
    entries.iter().map(|l| l.cost()).sum()
}

pub fn crane_fee(enabled: bool, amount: f64) -> f64 {
    if enabled {
        amount
    } else {
        0.0
    }
}

/// Risk surcharge on `base` (materials + equipment + labour + crane fee,
/// see `RISK_APPLIES_TO_TASKS`).
pub fn risk_amount(enabled: bool, percent: f64, base: f64) -> f64 {
    if enabled {
        base * percent / 100.0
    } else {
        0.0
    }
}

/// Base state multiplier. All listed states are currently rate-parity; the
/// table exists for future per-state differentiation. Unknown states fall
/// back to 1.0.
pub fn state_multiplier(state: &str) -> f64 {
    match state {
        "NSW" | "VIC" | "QLD" | "NT" => 1.0,
        _ => 1.0,
    }
}

/// Hourly rate for a role after its state multiplier. A non-zero
/// `state_adjustment` overrides the table lookup entirely.
pub fn effective_rate(role: &LabourRole) -> f64 {
    let mut mult = state_multiplier(&role.state);
    if role.state_adjustment != 0.0 {
        mult = 1.0 + role.state_adjustment / 100.0;
    }
    role.base_rate * mult
}

/// Resolve the effective rate for a (labour type, state) pair.
///
/// Exact match on type and state wins; otherwise the first role with the
/// requested type is re-evaluated under the requested state (its own
/// adjustment, if any, still applies). Returns 0.0 when the type is not
/// configured at all — callers must treat that as "blocked", not free labour.
pub fn resolve_rate(roles: &[LabourRole], labour_type: &str, state: &str) -> f64 {
    if let Some(role) = roles
        .iter()
        .find(|r| r.labour_type == labour_type && r.state == state)
    {
        return effective_rate(role);
    }
    if let Some(role) = roles.iter().find(|r| r.labour_type == labour_type) {
        let mut adjusted = role.clone();
        adjusted.state = state.to_string();
        return effective_rate(&adjusted);
    }
    0.0
}

/// Currency formatting used in notification messages: "$1,234.56".
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}
