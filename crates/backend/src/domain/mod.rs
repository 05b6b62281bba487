pub mod a001_issue;
