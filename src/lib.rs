//! Data Plane Signaling SDK.
//!
//! Embed a [`Dataplane`] in a data plane, register lifecycle hooks, and serve
//! [`server::build_router`] so a control plane can prepare, start, complete and
//! terminate data flows.

pub mod api;
pub mod api_docs;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use domain::{DataFlowStore, DomainError};
pub use infrastructure::config;
pub use infrastructure::server;
pub use models::{DataAddress, DataFlow, DataFlowState, TransferType};
pub use services::{Dataplane, DataplaneBuilder, RetryPolicy};
