// SPDX-License-Identifier: MIT
//
// docroute HTTP — reqwest-backed implementations of the engine's
// collaborator ports. Pure plumbing: every call maps to one backend
// endpoint, with failures surfaced as docroute errors and left to the
// engine's per-component failure policy. Nothing here retries.

pub mod config;
pub mod generator;
pub mod personalization;
pub mod pos;

pub use config::HttpConfig;
pub use generator::GeneratorClient;
pub use personalization::PersonalizationClient;
pub use pos::PosAgentClient;
