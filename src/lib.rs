#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod error;
pub mod extract;
pub mod import;
pub mod patterns;
pub mod schedule;
pub mod services;
pub mod types;

pub use error::*;
pub use types::*;
