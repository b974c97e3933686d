//! Shared building blocks for the showcase server.

pub mod storage;
