// SPDX-License-Identifier: MIT
//
// docroute — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::DocrouteError;
pub use types::*;
