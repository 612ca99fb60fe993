//! # attendance-gateway
//!
//! REST API and WebSocket gateway for event attendance: attendee
//! registration, check-in, and certificate issuance with SVG rendering.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── AttendanceService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AttendanceStore (persistence/)
//!     │     ├── MemoryStore
//!     │     └── PostgresStore
//! ```
//!
//! Certificate issuance is idempotent per (attendee, event): the store
//! inserts a certificate only if none exists for the pair, in the same
//! atomic step that flags the attendee.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
