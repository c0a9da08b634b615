//! Adoptly - AI Tool Adoption Dashboard Engine
//!
//! This crate implements the recommendation scoring and gamified
//! progression engine behind the Adoptly dashboard: personalized tool
//! recommendations, adoption feedback, and points/levels/achievements.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
