pub mod acquisition;
pub mod datasets;
pub mod db;
pub mod upload_storage;
