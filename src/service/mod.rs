//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Service records for the Service Registry
//!
//! This module provides the service record types managed by
//! the service registry.

pub mod core;
pub mod status;

// Re-export main types for convenience
pub use core::{ServiceRecord, ServiceRegistration};
pub use status::ServiceStatus;
