//! Services Layer
//!
//! This module contains the data plane logic, independent of the HTTP layer.
//! Services are called directly by embedding code or through Axum handlers.

pub mod control_plane;
pub mod dataplane;

pub use control_plane::{ControlPlaneClient, RetryPolicy};
pub use dataplane::{Dataplane, DataplaneBuilder, Hook};
