// src/models/mod.rs

pub mod article;
pub mod quiz;
pub mod record;
