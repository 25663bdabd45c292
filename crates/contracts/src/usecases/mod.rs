pub mod common;
pub mod u510_upload_staging;
