// HTTP access to the NextPlay stats and prediction service.

pub mod client;
pub mod error;

pub use client::{HttpApi, StatsApi, StatsQuery};
pub use error::{ApiError, ApiResult};
