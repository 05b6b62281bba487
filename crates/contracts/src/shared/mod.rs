pub mod lenient;
pub mod one_or_many;
pub mod timestamp;
