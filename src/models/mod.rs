// src/models/mod.rs

pub mod grading;
pub mod question;
pub mod session;
