//! Domain Layer
//!
//! The core of launchd-activate: what services are declared, what is
//! installed and loaded, and what has to change.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ServicePath, ServiceTarget, DomainTarget)
//! - `entities/` - Plan and the operations derived from it
//! - `services/` - Planner
//! - `ports/` - Interface definitions for infrastructure
//!
//! All I/O goes through trait-defined ports, so every decision here can be
//! exercised with in-memory fakes.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
