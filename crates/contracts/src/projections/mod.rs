//! Rows of the exported JSON aggregates, one module per dataset.

pub mod p910_monthly_sales;
pub mod p911_daily_sales;
pub mod p912_products;
pub mod p913_calendar;
pub mod p914_yoy;
pub mod p915_erosion_alerts;
