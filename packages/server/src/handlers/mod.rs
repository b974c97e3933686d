pub mod case_study;
pub mod catalog;
pub mod health;
