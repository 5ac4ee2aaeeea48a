// SPDX-License-Identifier: MIT
//
// docroute Engine — print orchestration, printer configuration
// resolution, firmware version gating, and raster staging. All network
// and host concerns are consumed through the port traits in [`ports`].

pub mod cache;
pub mod gate;
pub mod identity;
pub mod job;
pub mod orchestrator;
pub mod ports;
pub mod raster;
pub mod resolver;

pub use cache::CatalogCache;
pub use gate::GateDecision;
pub use orchestrator::{Collaborators, PrintOrchestrator, PrintRequest};
pub use ports::MemoryStore;
