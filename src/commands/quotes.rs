use chrono::Local;
use serde_json::Value;
use tauri::AppHandle;

use crate::models::{CreateQuote, Quote};
use crate::state::StoreExt;

fn api_base() -> String {
    std::env::var("RATECARD_API_BASE").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

/// Map a loosely-typed remote row onto the canonical quote shape. Rows with
/// no usable id are skipped.
pub fn normalize_quote(row: &Value) -> Option<Quote> {
    let id = row
        .get("id")
        .and_then(Value::as_i64)
        .or_else(|| row.get("quote_id").and_then(Value::as_i64))?;
    Some(Quote {
        id,
        client: row
            .get("client")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        region: row
            .get("region")
            .and_then(Value::as_str)
            .or_else(|| row.get("state").and_then(Value::as_str))
            .unwrap_or("—")
            .to_string(),
        product: row.get("product").and_then(Value::as_str).map(str::to_string),
        risk: row.get("risk").and_then(Value::as_str).map(str::to_string),
        created_on: row
            .get("created_on")
            .and_then(Value::as_str)
            .or_else(|| row.get("createdDateTime").and_then(Value::as_str))
            .unwrap_or("")
            .to_string(),
        status: row
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("draft")
            .to_lowercase(),
        total_amount: row.get("total_amount").and_then(Value::as_f64),
    })
}

async fn fetch_remote_quotes() -> Result<Vec<Quote>, reqwest::Error> {
    let rows: Vec<Value> = reqwest::get(format!("{}/quotes", api_base()))
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(rows.iter().filter_map(normalize_quote).collect())
}

/// Local quotes combined with whatever the remote source returns, newest
/// first. A failed fetch degrades to local-only.
#[tauri::command]
pub async fn get_quotes(app: AppHandle) -> Result<Vec<Quote>, String> {
    let local = {
        let store = app.store();
        let state = store.state.lock().map_err(|e| e.to_string())?;
        state.quotes.clone()
    };
    let remote = match fetch_remote_quotes().await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("remote quotes unavailable, using local only: {}", e);
            Vec::new()
        }
    };
    let mut combined = local;
    combined.extend(remote);
    combined.sort_by(|a, b| b.created_on.cmp(&a.created_on));
    Ok(combined)
}

#[tauri::command]
pub fn create_quote(app: AppHandle, quote: CreateQuote) -> Result<Quote, String> {
    let store = app.store();
    let mut state = store.state.lock().map_err(|e| e.to_string())?;
    let quote = state
        .create_quote(quote, Local::now().to_rfc3339())
        .map_err(|e| e.to_string())?;
    log::info!("quote {} created for {}", quote.id, quote.client);
    Ok(quote)
}

pub fn write_quotes_csv(quotes: &[Quote], path: &std::path::Path) -> Result<usize, String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer
        .write_record([
            "ID",
            "Client Name",
            "Region",
            "Product",
            "Risk",
            "Created On",
            "Status",
            "Total Cost",
        ])
        .map_err(|e| e.to_string())?;
    for q in quotes {
        let status = if q.status == "draft" { "Draft" } else { "Sent" };
        writer
            .write_record([
                q.id.to_string(),
                q.client.clone(),
                q.region.clone(),
                q.product.clone().unwrap_or_default(),
                q.risk.clone().unwrap_or_default(),
                q.created_on.clone(),
                status.to_string(),
                q.total_amount.map(|t| t.to_string()).unwrap_or_default(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(quotes.len())
}

#[tauri::command]
pub fn export_quotes_csv(app: AppHandle, path: String) -> Result<usize, String> {
    let quotes = {
        let store = app.store();
        let state = store.state.lock().map_err(|e| e.to_string())?;
        state.quotes.clone()
    };
    write_quotes_csv(&quotes, std::path::Path::new(&path))
}
