pub mod error;
pub mod filter;
pub mod patch;
pub mod repository;
pub mod service;
