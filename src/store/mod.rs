// src/store/mod.rs
//
// The persistence engine. Handlers stay thin; everything with a
// transaction or an invariant to protect lives here.

pub mod attempts;
pub mod composer;
pub mod reader;
pub mod scores;
