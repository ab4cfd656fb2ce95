//! Command handlers

pub mod config;
pub mod home;
pub mod link;
pub mod listen;
pub mod logs;
pub mod settings;
