//! Общие типы между backend и клиентами API трекера задач

pub mod domain;
pub mod shared;
