pub mod data_status;
pub mod indicators;
pub mod serde_helpers;
