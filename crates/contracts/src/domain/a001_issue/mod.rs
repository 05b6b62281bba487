pub mod aggregate;
pub mod field;
pub mod reply;
