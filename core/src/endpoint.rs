//! The endpoint catalog.
//!
//! # Design
//! Every backend operation is described by a static `EndpointDescriptor`
//! (method, path template, body encoding, decode mode) and executed through
//! one generic invoke path, instead of a pile of near-identical wrapper
//! functions. Path placeholders are filled with component-encoded argument
//! values; the encode set matches what a browser's `encodeURIComponent`
//! produces, since the backend was built against exactly those URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Logical name of one backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ParkingStatus,
    CompletedVehiclesToday,
    ActiveGates,
    InactiveGates,
    Revenue,
    ParkVehicle,
    UnparkVehicle,
    UpdateVehicle,
    ValidateAdmin,
    AddGate,
    UpdateGate,
}

impl Operation {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ParkingStatus => "parking_status",
            Operation::CompletedVehiclesToday => "completed_vehicles_today",
            Operation::ActiveGates => "active_gates",
            Operation::InactiveGates => "inactive_gates",
            Operation::Revenue => "revenue",
            Operation::ParkVehicle => "park_vehicle",
            Operation::UnparkVehicle => "unpark_vehicle",
            Operation::UpdateVehicle => "update_vehicle",
            Operation::ValidateAdmin => "validate_admin",
            Operation::AddGate => "add_gate",
            Operation::UpdateGate => "update_gate",
        }
    }

    /// The catalog entry for this operation.
    pub fn descriptor(self) -> EndpointDescriptor {
        match self {
            Operation::ParkingStatus => PARKING_STATUS,
            Operation::CompletedVehiclesToday => COMPLETED_VEHICLES_TODAY,
            Operation::ActiveGates => ACTIVE_GATES,
            Operation::InactiveGates => INACTIVE_GATES,
            Operation::Revenue => REVENUE,
            Operation::ParkVehicle => PARK_VEHICLE,
            Operation::UnparkVehicle => UNPARK_VEHICLE,
            Operation::UpdateVehicle => UPDATE_VEHICLE,
            Operation::ValidateAdmin => VALIDATE_ADMIN,
            Operation::AddGate => ADD_GATE,
            Operation::UpdateGate => UPDATE_GATE,
        }
    }
}

/// How a request body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    None,
    Json,
    Text,
}

/// How a 2xx response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Json,
    Text,
}

/// Static metadata for one backend operation. Defined once, looked up by
/// operation, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDescriptor {
    pub operation: Operation,
    pub method: HttpMethod,
    pub path_template: &'static str,
    pub encoding: BodyEncoding,
    pub decode: DecodeMode,
}

const PARKING_STATUS: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::ParkingStatus,
    method: HttpMethod::Get,
    path_template: "/parking/status",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const COMPLETED_VEHICLES_TODAY: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::CompletedVehiclesToday,
    method: HttpMethod::Get,
    path_template: "/vehicles/completed/today",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const ACTIVE_GATES: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::ActiveGates,
    method: HttpMethod::Get,
    path_template: "/gates/active",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const INACTIVE_GATES: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::InactiveGates,
    method: HttpMethod::Get,
    path_template: "/gates/inactive",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const REVENUE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::Revenue,
    method: HttpMethod::Get,
    path_template: "/revenue/{period}",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const PARK_VEHICLE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::ParkVehicle,
    method: HttpMethod::Post,
    path_template: "/vehicles/park",
    encoding: BodyEncoding::Json,
    decode: DecodeMode::Json,
};

const UNPARK_VEHICLE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::UnparkVehicle,
    method: HttpMethod::Delete,
    path_template: "/vehicles/unpark",
    encoding: BodyEncoding::Text,
    decode: DecodeMode::Json,
};

const UPDATE_VEHICLE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::UpdateVehicle,
    method: HttpMethod::Put,
    path_template: "/vehicles/{ticketId}",
    encoding: BodyEncoding::Json,
    decode: DecodeMode::Json,
};

const VALIDATE_ADMIN: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::ValidateAdmin,
    method: HttpMethod::Get,
    path_template: "/admin/validate/{username}/{password}",
    encoding: BodyEncoding::None,
    decode: DecodeMode::Json,
};

const ADD_GATE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::AddGate,
    method: HttpMethod::Post,
    path_template: "/gates",
    encoding: BodyEncoding::Json,
    decode: DecodeMode::Json,
};

// The backend answers gate updates with a plain-text confirmation while gate
// creation returns the created gate as JSON. The asymmetry is the backend's.
const UPDATE_GATE: EndpointDescriptor = EndpointDescriptor {
    operation: Operation::UpdateGate,
    method: HttpMethod::Put,
    path_template: "/gates/{gateId}",
    encoding: BodyEncoding::Json,
    decode: DecodeMode::Text,
};

/// Every descriptor, one per operation.
pub static CATALOG: [EndpointDescriptor; 11] = [
    PARKING_STATUS,
    COMPLETED_VEHICLES_TODAY,
    ACTIVE_GATES,
    INACTIVE_GATES,
    REVENUE,
    PARK_VEHICLE,
    UNPARK_VEHICLE,
    UPDATE_VEHICLE,
    VALIDATE_ADMIN,
    ADD_GATE,
    UPDATE_GATE,
];

/// The characters `encodeURIComponent` leaves unescaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Substitute `{placeholder}` segments in `template` with component-encoded
/// values from `params`, in order. Arity mismatches are configuration
/// errors, not panics.
pub fn fill_path(template: &str, params: &[&str]) -> Result<String, ApiError> {
    let mut out = String::with_capacity(template.len());
    let mut remaining = params.iter();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            return Err(ApiError::Config(format!(
                "unclosed placeholder in path template {template:?}"
            )));
        };
        out.push_str(&rest[..open]);
        let value = remaining.next().ok_or_else(|| {
            ApiError::Config(format!(
                "path template {template:?} has more placeholders than the {} supplied parameter(s)",
                params.len()
            ))
        })?;
        out.push_str(&encode_component(value));
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    if remaining.next().is_some() {
        return Err(ApiError::Config(format!(
            "path template {template:?} has fewer placeholders than the {} supplied parameter(s)",
            params.len()
        )));
    }
    Ok(out)
}
