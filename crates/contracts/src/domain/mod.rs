pub mod a001_issue;
pub mod common;
