//! Blocking client for the QuickPark parking-management REST API.
//!
//! # Overview
//! Four pieces: a request dispatcher (URL building, header merging, outcome
//! classification), a response decoder with an explicit JSON/text split, a
//! static endpoint catalog driven through one generic invoke path, and the
//! result envelope handed to UI callers.
//!
//! # Design
//! - Configuration (base URL, default headers) is validated and fixed at
//!   construction; nothing is process-global.
//! - The network primitive sits behind the `Transport` trait. `UreqTransport`
//!   is the stock implementation; tests substitute canned ones.
//! - Network and HTTP errors propagate to the caller. Decode failures never
//!   do, the payload falls back to the raw body text.
//! - No retries, no caching, no timeouts: one call is one round trip.

pub mod client;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{QuickParkClient, RequestBody};
pub use config::ClientConfig;
pub use decode::{decode_json, decode_text, Payload};
pub use dispatch::{join_url, DispatchOptions, Dispatcher};
pub use endpoint::{
    encode_component, fill_path, BodyEncoding, DecodeMode, EndpointDescriptor, Operation, CATALOG,
};
pub use envelope::Envelope;
pub use error::{ApiError, DecodeError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    AddGate, CompletedVehicle, Gate, ParkVehicle, ParkedTicket, ParkingStatus, RevenuePeriod,
    RevenueReport, UpdateGate, UpdateVehicle,
};
