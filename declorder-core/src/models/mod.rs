//! Data models for declorder
//!
//! Declaration records are produced by a front-end (the Go source visitors or
//! a manifest file), ordered by the resolvers and consumed by the renderers
//! and the stub generator. No record outlives one analysis run.

pub mod kind;
pub mod declaration;
pub mod manifest;

pub use kind::DeclarationKind;
pub use declaration::{
    Declaration, Leveled, Shape,
    StructShape, InterfaceShape, FunctionShape, VariableShape, ConstantShape, ImportShape,
    StructDecl, InterfaceDecl, FunctionDecl, VariableDecl, ConstantDecl, ImportDecl,
};
pub use manifest::{DeclarationManifest, ManifestEntry};
