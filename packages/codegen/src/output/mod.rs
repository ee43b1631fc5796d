//! Output Module
//!
//! Structured model of the generated Kotlin unit and its serialization.

pub mod emitter;
pub mod kotlin;

pub use emitter::Emitter;
pub use kotlin::{AnnotationSpec, FunctionSpec, GenerationUnit, ParameterSpec, WrapperKind};
