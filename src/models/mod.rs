// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod business;
pub mod query;

pub use business::*;
pub use query::*;
