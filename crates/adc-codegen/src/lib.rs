//! Generation pipeline for ad-control
//!
//! One generation pass turns a snapshot of attributed provider declarations
//! into a generated source package:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         Generation Pass                            │
//! ├────────────────────────────────────────────────────────────────────┤
//! │                                                                    │
//! │  discovery   →  collision    →  wrapper        →  emit             │
//! │  (scan for      detection       + registry        (write the      │
//! │   attributed    (fail closed    synthesis          adc_gen tree)  │
//! │   structs)      on repeats)     (deterministic)                   │
//! │                                                                    │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passes are single-threaded, independent, and idempotent: the same
//! discovered set always produces byte-identical artifacts. Any duplicate
//! provider name aborts the pass before a single file is written.

pub mod collision;
pub mod discovery;
pub mod emit;
pub mod pass;
pub mod registry;
pub mod wrapper;

pub use discovery::{DeclarationDiscovery, SourceScanner};
pub use emit::{ArtifactEmitter, FsEmitter};
pub use pass::{GenerationPass, PassSummary};
