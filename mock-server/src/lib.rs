use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Lot capacity; parking beyond it is rejected with 409.
pub const CAPACITY: usize = 20;

/// Flat fee charged when a vehicle leaves.
pub const FLAT_FEE: f64 = 20.0;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "p@rk 123";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkedTicket {
    pub ticket_id: String,
    pub vehicle_no: String,
    pub owner_name: String,
    pub vehicle_type: String,
    pub entry_time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkVehicle {
    pub vehicle_no: String,
    pub owner_name: String,
    pub vehicle_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicle {
    pub vehicle_no: Option<String>,
    pub owner_name: Option<String>,
    pub vehicle_type: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedVehicle {
    pub ticket_id: String,
    pub vehicle_no: String,
    pub entry_time: String,
    pub exit_time: String,
    pub amount_paid: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub gate_id: String,
    pub gate_name: String,
    pub active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGate {
    pub gate_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGate {
    pub gate_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingStatus {
    pub total_slots: usize,
    pub occupied_slots: usize,
    pub available_slots: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub period: String,
    pub total_amount: f64,
    pub vehicle_count: usize,
}

#[derive(Default)]
pub struct Lot {
    parked: HashMap<String, ParkedTicket>,
    completed: Vec<CompletedVehicle>,
    gates: HashMap<String, Gate>,
}

pub type Db = Arc<RwLock<Lot>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Lot::default()));
    Router::new()
        .route("/parking/status", get(parking_status))
        .route("/vehicles/park", post(park_vehicle))
        .route("/vehicles/unpark", delete(unpark_vehicle))
        .route("/vehicles/completed/today", get(completed_today))
        .route("/vehicles/{ticketId}", put(update_vehicle))
        .route("/gates", post(add_gate))
        .route("/gates/active", get(active_gates))
        .route("/gates/inactive", get(inactive_gates))
        .route("/gates/{gateId}", put(update_gate))
        .route("/revenue/{period}", get(revenue))
        .route("/admin/validate/{username}/{password}", get(validate_admin))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn parking_status(State(db): State<Db>) -> Json<ParkingStatus> {
    let lot = db.read().await;
    Json(ParkingStatus {
        total_slots: CAPACITY,
        occupied_slots: lot.parked.len(),
        available_slots: CAPACITY - lot.parked.len(),
    })
}

async fn park_vehicle(
    State(db): State<Db>,
    Json(input): Json<ParkVehicle>,
) -> Result<(StatusCode, Json<ParkedTicket>), (StatusCode, String)> {
    let mut lot = db.write().await;
    if lot.parked.len() >= CAPACITY {
        return Err((StatusCode::CONFLICT, "Parking full".to_string()));
    }
    let ticket = ParkedTicket {
        ticket_id: Uuid::new_v4().to_string(),
        vehicle_no: input.vehicle_no,
        owner_name: input.owner_name,
        vehicle_type: input.vehicle_type,
        entry_time: Utc::now().to_rfc3339(),
    };
    lot.parked.insert(ticket.ticket_id.clone(), ticket.clone());
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// The ticket id arrives as the plain-text DELETE body.
async fn unpark_vehicle(
    State(db): State<Db>,
    body: String,
) -> Result<Json<CompletedVehicle>, (StatusCode, String)> {
    let ticket_id = body.trim();
    let mut lot = db.write().await;
    let ticket = lot
        .parked
        .remove(ticket_id)
        .ok_or((StatusCode::NOT_FOUND, "Ticket not found".to_string()))?;
    let record = CompletedVehicle {
        ticket_id: ticket.ticket_id,
        vehicle_no: ticket.vehicle_no,
        entry_time: ticket.entry_time,
        exit_time: Utc::now().to_rfc3339(),
        amount_paid: FLAT_FEE,
    };
    lot.completed.push(record.clone());
    Ok(Json(record))
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(ticket_id): Path<String>,
    Json(input): Json<UpdateVehicle>,
) -> Result<Json<ParkedTicket>, (StatusCode, String)> {
    let mut lot = db.write().await;
    let ticket = lot
        .parked
        .get_mut(&ticket_id)
        .ok_or((StatusCode::NOT_FOUND, "Ticket not found".to_string()))?;
    if let Some(vehicle_no) = input.vehicle_no {
        ticket.vehicle_no = vehicle_no;
    }
    if let Some(owner_name) = input.owner_name {
        ticket.owner_name = owner_name;
    }
    if let Some(vehicle_type) = input.vehicle_type {
        ticket.vehicle_type = vehicle_type;
    }
    Ok(Json(ticket.clone()))
}

/// In-memory state lives for one run, so every completed record is "today".
async fn completed_today(State(db): State<Db>) -> Json<Vec<CompletedVehicle>> {
    let lot = db.read().await;
    Json(lot.completed.clone())
}

async fn add_gate(State(db): State<Db>, Json(input): Json<AddGate>) -> (StatusCode, Json<Gate>) {
    let gate = Gate {
        gate_id: Uuid::new_v4().to_string(),
        gate_name: input.gate_name,
        active: true,
    };
    db.write().await.gates.insert(gate.gate_id.clone(), gate.clone());
    (StatusCode::CREATED, Json(gate))
}

async fn active_gates(State(db): State<Db>) -> Json<Vec<Gate>> {
    let lot = db.read().await;
    Json(lot.gates.values().filter(|g| g.active).cloned().collect())
}

async fn inactive_gates(State(db): State<Db>) -> Json<Vec<Gate>> {
    let lot = db.read().await;
    Json(lot.gates.values().filter(|g| !g.active).cloned().collect())
}

/// Gate updates answer with a plain-text confirmation, unlike gate creation
/// which returns the created gate as JSON.
async fn update_gate(
    State(db): State<Db>,
    Path(gate_id): Path<String>,
    Json(input): Json<UpdateGate>,
) -> Result<String, (StatusCode, String)> {
    let mut lot = db.write().await;
    let gate = lot
        .gates
        .get_mut(&gate_id)
        .ok_or((StatusCode::NOT_FOUND, "Gate not found".to_string()))?;
    if let Some(gate_name) = input.gate_name {
        gate.gate_name = gate_name;
    }
    if let Some(active) = input.active {
        gate.active = active;
    }
    Ok("Gate updated successfully".to_string())
}

async fn revenue(
    State(db): State<Db>,
    Path(period): Path<String>,
) -> Result<Json<RevenueReport>, (StatusCode, String)> {
    if !matches!(period.as_str(), "today" | "week" | "month") {
        return Err((StatusCode::BAD_REQUEST, format!("Unknown period: {period}")));
    }
    // Everything completed in-memory happened within the run, so each
    // period covers the full completed list.
    let lot = db.read().await;
    Ok(Json(RevenueReport {
        period,
        total_amount: lot.completed.iter().map(|c| c.amount_paid).sum(),
        vehicle_count: lot.completed.len(),
    }))
}

async fn validate_admin(Path((username, password)): Path<(String, String)>) -> Json<bool> {
    Json(username == ADMIN_USER && password == ADMIN_PASSWORD)
}
