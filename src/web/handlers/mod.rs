//! # Web API Handlers

pub mod calculations;
pub mod health;
