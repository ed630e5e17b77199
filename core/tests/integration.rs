//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every catalog
//! operation over real HTTP with the stock transport. Validates request
//! building, status classification, and both decode modes end to end.

use quickpark_core::{
    AddGate, ApiError, CompletedVehicle, Gate, ParkVehicle, ParkedTicket, ParkingStatus,
    QuickParkClient, RevenuePeriod, RevenueReport, UpdateGate, UpdateVehicle,
};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn parking_lifecycle() {
    let addr = start_mock_server();
    let client = QuickParkClient::new(&format!("http://{addr}")).unwrap();

    // Step 1: empty lot.
    let envelope = client.parking_status().unwrap();
    assert!(envelope.is_success());
    let status: ParkingStatus = envelope.decode_data().unwrap();
    assert_eq!(status.occupied_slots, 0);
    assert_eq!(status.total_slots, status.available_slots);

    // Step 2: park a vehicle.
    let envelope = client
        .park_vehicle(&ParkVehicle {
            vehicle_no: "AB12".to_string(),
            owner_name: "X".to_string(),
            vehicle_type: "car".to_string(),
        })
        .unwrap();
    assert!(envelope.is_success());
    let ticket: ParkedTicket = envelope.decode_data().unwrap();
    assert!(!ticket.ticket_id.is_empty());
    assert_eq!(ticket.vehicle_no, "AB12");

    // Step 3: the slot is taken.
    let status: ParkingStatus = client.parking_status().unwrap().decode_data().unwrap();
    assert_eq!(status.occupied_slots, 1);

    // Step 4: update the owner; other fields survive.
    let envelope = client
        .update_vehicle(
            &ticket.ticket_id,
            &UpdateVehicle {
                vehicle_no: None,
                owner_name: Some("Y".to_string()),
                vehicle_type: None,
            },
        )
        .unwrap();
    let updated: ParkedTicket = envelope.decode_data().unwrap();
    assert_eq!(updated.owner_name, "Y");
    assert_eq!(updated.vehicle_no, "AB12");

    // Step 5: unpark; the completed record carries the fee.
    let envelope = client.unpark_vehicle(&ticket.ticket_id).unwrap();
    let completed: CompletedVehicle = envelope.decode_data().unwrap();
    assert_eq!(completed.ticket_id, ticket.ticket_id);
    assert!(completed.amount_paid > 0.0);

    // Step 6: it shows up in today's completed list and in revenue.
    let envelope = client.completed_vehicles_today().unwrap();
    let today: Vec<CompletedVehicle> = envelope.decode_data().unwrap();
    assert_eq!(today.len(), 1);

    let envelope = client.revenue(RevenuePeriod::Today).unwrap();
    let report: RevenueReport = envelope.decode_data().unwrap();
    assert_eq!(report.vehicle_count, 1);
    assert_eq!(report.total_amount, completed.amount_paid);

    // Step 7: unparking the same ticket again fails with the backend's
    // error body, verbatim.
    let err = client.unpark_vehicle(&ticket.ticket_id).unwrap_err();
    assert_eq!(err.to_string(), "Ticket not found");
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
}

#[test]
fn gate_lifecycle() {
    let addr = start_mock_server();
    let client = QuickParkClient::new(&format!("http://{addr}")).unwrap();

    let envelope = client
        .add_gate(&AddGate {
            gate_name: "North".to_string(),
        })
        .unwrap();
    let gate: Gate = envelope.decode_data().unwrap();
    assert!(gate.active);

    let active: Vec<Gate> = client.active_gates().unwrap().decode_data().unwrap();
    assert!(active.iter().any(|g| g.gate_id == gate.gate_id));

    // Gate updates come back as a plain-text confirmation, not JSON.
    let envelope = client
        .update_gate(
            &gate.gate_id,
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

    let inactive: Vec<Gate> = client.inactive_gates().unwrap().decode_data().unwrap();
    assert!(inactive.iter().any(|g| g.gate_id == gate.gate_id));

    let err = client
        .update_gate(
            "no-such-gate",
            &UpdateGate {
                gate_name: None,
                active: Some(true),
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Gate not found");
}

#[test]
fn admin_validation_encodes_credentials_end_to_end() {
    let addr = start_mock_server();
    let client = QuickParkClient::new(&format!("http://{addr}")).unwrap();

    // The real password contains a space and an `@`, so this only passes if
    // the path components are percent-encoded the way the backend decodes.
    let envelope = client.validate_admin("admin", "p@rk 123").unwrap();
    let valid: bool = envelope.decode_data().unwrap();
    assert!(valid);

    let envelope = client.validate_admin("admin", "wrong").unwrap();
    let valid: bool = envelope.decode_data().unwrap();
    assert!(!valid);
}

#[test]
fn unreachable_backend_is_a_network_error() {
    // Bind then drop a listener so the port is very likely closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = QuickParkClient::new(&format!("http://{addr}")).unwrap();
    let err = client.parking_status().unwrap_err();
    assert!(err.is_network_error());
    assert!(matches!(err, ApiError::Network(_)));
}
