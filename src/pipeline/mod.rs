//! Pipeline stages for songbook extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different text-extraction backend) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ segment ──▶ classify/structure ──▶ render
//! (PDF)     (digit       (marker FSM +          (<p>-wrapped
//!            markers)     length fallback)       block text)
//! ```
//!
//! 1. [`input`]     — validate the path and extract the flat text stream
//! 2. [`segment`]   — split the stream into per-song units on digit markers
//! 3. [`classify`]  — tag each body line (key / chorus / verse / content)
//! 4. [`structure`] — build titled verse/chorus blocks from the tags
//! 5. [`render`]    — serialize blocks to the persisted text format

pub mod classify;
pub mod input;
pub mod render;
pub mod segment;
pub mod structure;
