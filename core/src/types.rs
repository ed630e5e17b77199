//! Domain payloads for the QuickPark backend.
//!
//! # Design
//! Wire names are camelCase because the backend serves the browser client
//! unchanged. Partial updates serialize only the fields that are present;
//! omitted fields remain unchanged on the server. Ticket and gate ids are
//! opaque strings, the client never inspects them.

use serde::{Deserialize, Serialize};

/// Request payload for parking a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkVehicle {
    pub vehicle_no: String,
    pub owner_name: String,
    pub vehicle_type: String,
}

/// Ticket issued when a vehicle is parked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParkedTicket {
    pub ticket_id: String,
    pub vehicle_no: String,
    pub owner_name: String,
    pub vehicle_type: String,
    pub entry_time: String,
}

/// Partial update of a parked vehicle's details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
}

/// Occupancy snapshot of the lot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParkingStatus {
    pub total_slots: u32,
    pub occupied_slots: u32,
    pub available_slots: u32,
}

/// A vehicle that has left the lot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedVehicle {
    pub ticket_id: String,
    pub vehicle_no: String,
    pub entry_time: String,
    pub exit_time: String,
    pub amount_paid: f64,
}

/// One entry or exit gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub gate_id: String,
    pub gate_name: String,
    pub active: bool,
}

/// Request payload for creating a gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGate {
    pub gate_name: String,
}

/// Partial update of a gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Reporting window for the revenue endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenuePeriod {
    Today,
    Week,
    Month,
}

impl RevenuePeriod {
    /// The path segment the backend expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenuePeriod::Today => "today",
            RevenuePeriod::Week => "week",
            RevenuePeriod::Month => "month",
        }
    }
}

/// Revenue summary for one reporting window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub period: String,
    pub total_amount: f64,
    pub vehicle_count: u32,
}
