//! Tauri command handlers (DTO boundary).

pub mod lecture;
