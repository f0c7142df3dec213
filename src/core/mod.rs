// src/core/mod.rs

pub mod lenient;
pub mod net;
