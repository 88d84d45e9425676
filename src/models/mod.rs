// src/models/mod.rs

pub mod attempt;
pub mod lesson;
pub mod quiz;
pub mod student;
