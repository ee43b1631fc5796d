#![deny(clippy::all)]

//! kotbridge codegen
//!
//! Compile-time generator that turns marker-annotated suspend and flow
//! functions into callback-based sibling declarations, so that Kotlin
//! coroutines stay callable from targets without native coroutine support.
//! One compilation round is scanned once, every match is synthesized into a
//! single generated unit, and the unit is written out when the round ends.

pub mod config;
pub mod declaration;
pub mod discovery;
mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod pass;
pub mod testing;

pub use config::GeneratorOptions;
pub use error::EmitError;
pub use pass::BridgePass;
