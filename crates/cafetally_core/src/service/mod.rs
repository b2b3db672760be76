//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model operations and slot persistence into use-case APIs.
//! - Keep front ends decoupled from storage details.

pub mod import_service;
pub mod inventory_service;
