// src/handlers/mod.rs

pub mod attempt;
pub mod lesson;
pub mod quiz;
