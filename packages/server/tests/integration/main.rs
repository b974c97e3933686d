mod catalog;
mod common;
mod health;
