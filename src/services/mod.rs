// src/services/mod.rs

pub mod gemini;
pub mod generator;
pub mod quiz;
pub mod scraper;
pub mod store;
