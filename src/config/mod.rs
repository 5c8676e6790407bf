pub mod oracle;
pub mod proc_loader;
pub mod proc_validator;
pub mod settings;
pub mod store;
pub mod types;
