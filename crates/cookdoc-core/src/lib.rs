//! # Cookdoc Core
//!
//! Reconciles the cookbooks a chef server knows about with the cookbooks
//! checked out locally, then runs a fixed battery of consistency checks over
//! each merged record.
//!
//! ## Architecture
//!
//! ```text
//! RegistrySource ─► parse_registry_listing ─┐
//!                                           ├─► Reconciler ─► [Reconciled]
//! search roots ───► discover_local ─────────┘                    │
//!                                                                ▼
//!                              GitStatus ─────────────────────► Runner ─► Reporter
//! ```
//!
//! The crate never spawns processes or prints; the `ports` traits are the
//! seams for both.

pub mod check;
pub mod cookbook;
pub mod error;
pub mod inventory;
pub mod ports;
pub mod reconcile;
pub mod runner;

pub use check::{Check, Finding, unpushed_upstream};
pub use cookbook::Cookbook;
pub use error::{CookdocError, MalformedMetadata};
pub use inventory::{LocalInventory, VersionMap, discover_local, parse_registry_listing};
pub use ports::{GitStatus, RegistrySource, Reporter};
pub use reconcile::{Reconciled, Reconciler, merged_names, resolve_path};
pub use runner::{RunSummary, Runner};
