//! Service layer: business logic orchestration.
//!
//! [`AttendanceService`] drives the register → check-in → certify workflow
//! against an injected store and emits events through the
//! [`super::domain::EventBus`].

pub mod attendance_service;

pub use attendance_service::{AttendanceService, CertificateArtifact, IssuancePolicy};
