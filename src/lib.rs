// src/lib.rs

//! Knowledge base query adapter library

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod services;
#[cfg(feature = "cli")]
pub mod smoke;
#[cfg(feature = "cli")]
pub mod utils;
