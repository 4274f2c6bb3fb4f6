//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SLA_MINUTES: i64 = 240;
pub const DEFAULT_SLA_WARNING_PERCENT: i64 = 75;
pub const MIN_SATISFACTION_SCORE: i32 = 1;
pub const MAX_SATISFACTION_SCORE: i32 = 5;
pub const TENANT_HEADER: &str = "x-tenant-id";
