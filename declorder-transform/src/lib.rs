//! declorder transform - no-op stub generation
//!
//! This crate turns interface declarations into placeholder Go
//! implementations:
//! - Method signature re-parsing
//! - Zero-value inference for return clauses
//! - `NoOp<Name>` stub generation with dependency levels
//! - Filesystem persistence of generated documents

#![warn(clippy::all, clippy::pedantic)]

pub mod noop;
pub mod signature;
pub mod writer;
pub mod zero_values;

// Re-export main types for convenience
pub use noop::{interface_code_generator, InterfaceImplementationNamer, InterfaceNoOpGenerator};
pub use signature::{parse_method_signature, MethodSignature};
pub use writer::{noop_file_path, FsFileWriter};
pub use zero_values::{zero_value, zero_values};
