pub mod error;
pub mod validation_cache;
pub mod validation_record;
