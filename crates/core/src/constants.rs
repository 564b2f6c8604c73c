/// Day-count basis for annual rates (actual/365)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Decimal precision for amounts reported back to callers
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
