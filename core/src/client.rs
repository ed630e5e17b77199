//! The QuickPark client: one generic invoke path plus a thin typed wrapper
//! per backend operation.
//!
//! # Design
//! `invoke` looks up the operation's catalog descriptor, fills the path
//! template, encodes the body the way the descriptor says, dispatches, and
//! decodes the 2xx body per the descriptor's decode mode. Wrappers add
//! nothing beyond naming and typed parameters, so every operation shares
//! one code path for logging and error classification. Network and HTTP
//! errors propagate to the caller; decode failures never do, the payload
//! falls back to the raw body text.

use serde::Serialize;
use tracing::error;

use crate::config::ClientConfig;
use crate::decode::{decode_text, Payload};
use crate::dispatch::{DispatchOptions, Dispatcher};
use crate::endpoint::{fill_path, BodyEncoding, DecodeMode, EndpointDescriptor, Operation};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{AddGate, ParkVehicle, RevenuePeriod, UpdateGate, UpdateVehicle};

/// Request body handed to `invoke`, already matched to the descriptor's
/// encoding mode by the typed wrappers.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
}

/// Client for the QuickPark REST backend.
#[derive(Debug)]
pub struct QuickParkClient<T = UreqTransport> {
    dispatcher: Dispatcher<T>,
}

impl QuickParkClient<UreqTransport> {
    /// Client with the stock ureq transport.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            ClientConfig::new(base_url)?,
            UreqTransport::new(),
        ))
    }
}

impl<T: Transport> QuickParkClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Execute one catalog operation. This is the whole request pipeline;
    /// the typed wrappers below only name the operation and its arguments.
    pub fn invoke(
        &self,
        operation: Operation,
        params: &[&str],
        body: Option<RequestBody>,
    ) -> Result<Envelope, ApiError> {
        let result = self.invoke_inner(operation.descriptor(), params, body);
        if let Err(err) = &result {
            error!(operation = operation.name(), error = %err, "request failed");
        }
        result
    }

    fn invoke_inner(
        &self,
        descriptor: EndpointDescriptor,
        params: &[&str],
        body: Option<RequestBody>,
    ) -> Result<Envelope, ApiError> {
        let path = fill_path(descriptor.path_template, params)?;
        let mut options = DispatchOptions::new(descriptor.method);

        match (descriptor.encoding, body) {
            (BodyEncoding::None, None) => {}
            (BodyEncoding::Json, Some(RequestBody::Json(value))) => {
                let encoded = serde_json::to_string(&value)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                options = options.body(encoded);
            }
            (BodyEncoding::Text, Some(RequestBody::Text(text))) => {
                options = options.header("Content-Type", "text/plain").body(text);
            }
            (encoding, _) => {
                return Err(ApiError::Config(format!(
                    "operation {} expects a {:?} body",
                    descriptor.operation.name(),
                    encoding
                )));
            }
        }

        let response = self.dispatcher.dispatch(&path, options)?;
        let payload = match descriptor.decode {
            DecodeMode::Json => Payload::from_json_or_text(&response.body),
            DecodeMode::Text => Payload::Text(decode_text(&response.body)),
        };
        Ok(Envelope::success(payload))
    }

    pub fn parking_status(&self) -> Result<Envelope, ApiError> {
        self.invoke(Operation::ParkingStatus, &[], None)
    }

    pub fn completed_vehicles_today(&self) -> Result<Envelope, ApiError> {
        self.invoke(Operation::CompletedVehiclesToday, &[], None)
    }

    pub fn active_gates(&self) -> Result<Envelope, ApiError> {
        self.invoke(Operation::ActiveGates, &[], None)
    }

    pub fn inactive_gates(&self) -> Result<Envelope, ApiError> {
        self.invoke(Operation::InactiveGates, &[], None)
    }

    pub fn revenue(&self, period: RevenuePeriod) -> Result<Envelope, ApiError> {
        self.invoke(Operation::Revenue, &[period.as_str()], None)
    }

    pub fn park_vehicle(&self, input: &ParkVehicle) -> Result<Envelope, ApiError> {
        self.invoke(Operation::ParkVehicle, &[], Some(json_body(input)?))
    }

    /// The backend takes the ticket id as the DELETE body, as plain text.
    pub fn unpark_vehicle(&self, ticket_id: &str) -> Result<Envelope, ApiError> {
        self.invoke(
            Operation::UnparkVehicle,
            &[],
            Some(RequestBody::Text(ticket_id.to_string())),
        )
    }

    pub fn update_vehicle(
        &self,
        ticket_id: &str,
        input: &UpdateVehicle,
    ) -> Result<Envelope, ApiError> {
        self.invoke(Operation::UpdateVehicle, &[ticket_id], Some(json_body(input)?))
    }

    pub fn validate_admin(&self, username: &str, password: &str) -> Result<Envelope, ApiError> {
        self.invoke(Operation::ValidateAdmin, &[username, password], None)
    }

    pub fn add_gate(&self, input: &AddGate) -> Result<Envelope, ApiError> {
        self.invoke(Operation::AddGate, &[], Some(json_body(input)?))
    }

    pub fn update_gate(&self, gate_id: &str, input: &UpdateGate) -> Result<Envelope, ApiError> {
        self.invoke(Operation::UpdateGate, &[gate_id], Some(json_body(input)?))
    }
}

fn json_body<T: Serialize>(input: &T) -> Result<RequestBody, ApiError> {
    let value = serde_json::to_value(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(RequestBody::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::transport::TransportError;
    use std::cell::RefCell;

    struct CannedTransport {
        response: HttpResponse,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, status_text: &str, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status,
                    status_text: status_text.to_string(),
                    headers: Vec::new(),
                    body: body.to_string(),
                },
                seen: RefCell::new(Vec::new()),
            }
        }

        fn last_request(&self) -> HttpRequest {
            self.seen.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for CannedTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(self.response.clone())
        }
    }

    struct UnreachableTransport;

    impl Transport for UnreachableTransport {
        fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError("connection refused".to_string()))
        }
    }

    fn client(transport: CannedTransport) -> QuickParkClient<CannedTransport> {
        QuickParkClient::with_transport(
            ClientConfig::new("http://localhost:3000").unwrap(),
            transport,
        )
    }

    #[test]
    fn park_vehicle_posts_camel_case_json() {
        let c = client(CannedTransport::new(201, "Created", r#"{"ticketId":"T1"}"#));
        let input = ParkVehicle {
            vehicle_no: "AB12".to_string(),
            owner_name: "X".to_string(),
            vehicle_type: "car".to_string(),
        };
        let envelope = c.park_vehicle(&input).unwrap();

        let request = c.dispatcher.transport().last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://localhost:3000/vehicles/park");
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["vehicleNo"], "AB12");
        assert_eq!(body["ownerName"], "X");

        assert!(envelope.is_success());
        assert_eq!(envelope.data().unwrap().as_json().unwrap()["ticketId"], "T1");
    }

    #[test]
    fn unpark_vehicle_sends_ticket_id_as_text_body() {
        let c = client(CannedTransport::new(200, "OK", r#"{"amountPaid":20.0}"#));
        c.unpark_vehicle("T1").unwrap();

        let request = c.dispatcher.transport().last_request();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://localhost:3000/vehicles/unpark");
        assert_eq!(request.body.as_deref(), Some("T1"));
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn unpark_vehicle_surfaces_backend_error_body() {
        let c = client(CannedTransport::new(404, "Not Found", "Ticket not found"));
        let err = c.unpark_vehicle("T1").unwrap_err();
        assert_eq!(err.to_string(), "Ticket not found");
    }

    #[test]
    fn validate_admin_component_encodes_credentials() {
        let c = client(CannedTransport::new(200, "OK", "true"));
        let envelope = c.validate_admin("ad min", "p@ss").unwrap();

        let request = c.dispatcher.transport().last_request();
        assert_eq!(
            request.url,
            "http://localhost:3000/admin/validate/ad%20min/p%40ss"
        );
        assert_eq!(
            envelope.data().unwrap().as_json(),
            Some(&serde_json::Value::Bool(true))
        );
    }

    #[test]
    fn update_vehicle_fills_ticket_id_into_path() {
        let c = client(CannedTransport::new(200, "OK", r#"{"ticketId":"T1"}"#));
        let input = UpdateVehicle {
            vehicle_no: None,
            owner_name: Some("Y".to_string()),
            vehicle_type: None,
        };
        c.update_vehicle("T1", &input).unwrap();

        let request = c.dispatcher.transport().last_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://localhost:3000/vehicles/T1");
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["ownerName"], "Y");
        assert!(body.get("vehicleNo").is_none());
    }

    #[test]
    fn revenue_builds_period_path() {
        let c = client(CannedTransport::new(
            200,
            "OK",
            r#"{"period":"week","totalAmount":40.0,"vehicleCount":2}"#,
        ));
        c.revenue(RevenuePeriod::Week).unwrap();
        let request = c.dispatcher.transport().last_request();
        assert_eq!(request.url, "http://localhost:3000/revenue/week");
    }

    #[test]
    fn add_gate_decodes_json_response() {
        let c = client(CannedTransport::new(
            201,
            "Created",
            r#"{"gateId":"G1","gateName":"North","active":true}"#,
        ));
        let envelope = c
            .add_gate(&AddGate {
                gate_name: "North".to_string(),
            })
            .unwrap();
        assert_eq!(
            envelope.data().unwrap().as_json().unwrap()["gateName"],
            "North"
        );
    }

    #[test]
    fn update_gate_keeps_response_as_text() {
        let c = client(CannedTransport::new(200, "OK", "Gate updated successfully"));
        let envelope = c
            .update_gate(
                "G1",
                &UpdateGate {
                    gate_name: None,
                    active: Some(false),
                },
            )
            .unwrap();
        assert_eq!(
            envelope.data().unwrap().as_text(),
            Some("Gate updated successfully")
        );
    }

    #[test]
    fn json_endpoint_falls_back_to_text_on_unparseable_body() {
        let c = client(CannedTransport::new(200, "OK", "not json at all"));
        let envelope = c.parking_status().unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.data().unwrap().as_text(), Some("not json at all"));
    }

    #[test]
    fn unreachable_backend_is_a_network_error() {
        let c = QuickParkClient::with_transport(
            ClientConfig::new("http://localhost:3000").unwrap(),
            UnreachableTransport,
        );
        let err = c.parking_status().unwrap_err();
        assert!(err.is_network_error());

        let envelope = Envelope::from(&err);
        assert!(envelope.is_network_error());
        assert!(!envelope.is_success());
    }

    #[test]
    fn invoke_rejects_body_kind_mismatch() {
        let c = client(CannedTransport::new(200, "OK", "{}"));
        let err = c
            .invoke(
                Operation::ParkingStatus,
                &[],
                Some(RequestBody::Text("stray".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
