// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod leads;
pub mod sheets;

pub use health::config as health_config;
pub use leads::config as leads_config;
pub use sheets::config as sheets_config;
