//! API constants

/// Versioned prefix for every authenticated route
pub const API_PREFIX: &str = "/api/v1";
