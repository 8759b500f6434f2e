//! Per-unit analysis session.
//!
//! A session owns one engine per active kind for the lifetime of a single
//! source unit. Which kinds are active comes from the run's
//! [`AnalysisConfig`]; nothing is registered globally.

use super::pipeline::{declaration_engine, AnalysisEngine, GeneratedStub, GenericCodeGenerator};
use super::render::{
    ConstantRenderer, FunctionRenderer, ImportRenderer, InterfaceRenderer, StructRenderer,
    VariableRenderer,
};
use super::NodeVisitor;
use crate::models::{
    ConstantDecl, DeclarationKind, FunctionDecl, ImportDecl, InterfaceDecl, Leveled, StructDecl,
    VariableDecl,
};
use crate::{AnalysisConfig, Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// The node visitor for every kind, for one syntax-unit type `N`
pub struct KindVisitors<'a, N> {
    pub structs: Box<dyn NodeVisitor<N, StructDecl> + 'a>,
    pub interfaces: Box<dyn NodeVisitor<N, InterfaceDecl> + 'a>,
    pub functions: Box<dyn NodeVisitor<N, FunctionDecl> + 'a>,
    pub variables: Box<dyn NodeVisitor<N, VariableDecl> + 'a>,
    pub constants: Box<dyn NodeVisitor<N, ConstantDecl> + 'a>,
    pub imports: Box<dyn NodeVisitor<N, ImportDecl> + 'a>,
}

impl<'a, N> KindVisitors<'a, N> {
    /// Use one visitor value for every kind
    pub fn uniform<V>(visitor: V) -> Self
    where
        V: NodeVisitor<N, StructDecl>
            + NodeVisitor<N, InterfaceDecl>
            + NodeVisitor<N, FunctionDecl>
            + NodeVisitor<N, VariableDecl>
            + NodeVisitor<N, ConstantDecl>
            + NodeVisitor<N, ImportDecl>
            + Clone
            + 'a,
    {
        Self {
            structs: Box::new(visitor.clone()),
            interfaces: Box::new(visitor.clone()),
            functions: Box::new(visitor.clone()),
            variables: Box::new(visitor.clone()),
            constants: Box::new(visitor.clone()),
            imports: Box::new(visitor),
        }
    }
}

pub struct UnitSession<'a, N> {
    structs: Option<AnalysisEngine<'a, N, StructDecl>>,
    interfaces: Option<AnalysisEngine<'a, N, InterfaceDecl>>,
    functions: Option<AnalysisEngine<'a, N, FunctionDecl>>,
    variables: Option<AnalysisEngine<'a, N, VariableDecl>>,
    constants: Option<AnalysisEngine<'a, N, ConstantDecl>>,
    imports: Option<AnalysisEngine<'a, N, ImportDecl>>,
    package_name: String,
}

fn section<N, T: Clone + Leveled>(
    kind: DeclarationKind,
    engine: Option<&AnalysisEngine<'_, N, T>>,
) -> Option<String> {
    engine.map(|engine| format!("\n{}\n{}", kind.heading(), engine.render_results()))
}

impl<'a, N: 'a> UnitSession<'a, N> {
    /// Build engines for the kinds active in `config`
    pub fn new(config: &AnalysisConfig, visitors: KindVisitors<'a, N>) -> Self {
        let strategy = config.sort;
        let active = |kind| config.is_active(kind);

        Self {
            structs: active(DeclarationKind::Struct)
                .then(|| declaration_engine(visitors.structs, StructRenderer, strategy)),
            interfaces: active(DeclarationKind::Interface)
                .then(|| declaration_engine(visitors.interfaces, InterfaceRenderer, strategy)),
            functions: active(DeclarationKind::Function)
                .then(|| declaration_engine(visitors.functions, FunctionRenderer, strategy)),
            variables: active(DeclarationKind::Variable)
                .then(|| declaration_engine(visitors.variables, VariableRenderer, strategy)),
            constants: active(DeclarationKind::Constant)
                .then(|| declaration_engine(visitors.constants, ConstantRenderer, strategy)),
            imports: active(DeclarationKind::Import)
                .then(|| declaration_engine(visitors.imports, ImportRenderer, strategy)),
            package_name: config.noop.package_name.clone(),
        }
    }

    /// Attach the interface stub generator; ignored when interfaces are
    /// not active
    pub fn with_interface_generator(mut self, generator: GenericCodeGenerator<'a, InterfaceDecl>) -> Self {
        self.interfaces = self.interfaces.map(|engine| engine.with_code_generator(generator));
        self
    }

    pub fn is_active(&self, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::Struct => self.structs.is_some(),
            DeclarationKind::Interface => self.interfaces.is_some(),
            DeclarationKind::Function => self.functions.is_some(),
            DeclarationKind::Variable => self.variables.is_some(),
            DeclarationKind::Constant => self.constants.is_some(),
            DeclarationKind::Import => self.imports.is_some(),
        }
    }

    /// Feed one syntax unit to the engine of `kind`, if active
    pub fn feed(&mut self, kind: DeclarationKind, node: &N) -> bool {
        match kind {
            DeclarationKind::Struct => self.structs.as_mut().is_some_and(|e| e.analyze(node)),
            DeclarationKind::Interface => self.interfaces.as_mut().is_some_and(|e| e.analyze(node)),
            DeclarationKind::Function => self.functions.as_mut().is_some_and(|e| e.analyze(node)),
            DeclarationKind::Variable => self.variables.as_mut().is_some_and(|e| e.analyze(node)),
            DeclarationKind::Constant => self.constants.as_mut().is_some_and(|e| e.analyze(node)),
            DeclarationKind::Import => self.imports.as_mut().is_some_and(|e| e.analyze(node)),
        }
    }

    /// Feed several units to the engine of `kind`, returning how many
    /// records were collected
    pub fn feed_all<'n, I>(&mut self, kind: DeclarationKind, nodes: I) -> usize
    where
        I: IntoIterator<Item = &'n N>,
        N: 'n,
    {
        let collected = nodes.into_iter().filter(|node| self.feed(kind, node)).count();
        debug!(%kind, collected, "fed syntax units");
        collected
    }

    /// Report sections for every active kind, in report order
    pub fn render_report(&self) -> String {
        [
            section(DeclarationKind::Struct, self.structs.as_ref()),
            section(DeclarationKind::Interface, self.interfaces.as_ref()),
            section(DeclarationKind::Function, self.functions.as_ref()),
            section(DeclarationKind::Variable, self.variables.as_ref()),
            section(DeclarationKind::Constant, self.constants.as_ref()),
            section(DeclarationKind::Import, self.imports.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Generated interface stubs keyed by implementation name
    pub fn generate_stubs(&self) -> BTreeMap<String, GeneratedStub> {
        self.interfaces
            .as_ref()
            .map(|engine| engine.generate_stubs())
            .unwrap_or_default()
    }

    /// Write the generated document for this unit to `path`.
    ///
    /// Returns `Ok(false)` without touching the filesystem when no interface
    /// produced a stub.
    pub fn generate_code_file(&self, path: &Path) -> Result<bool> {
        let engine = self.interfaces.as_ref().ok_or(Error::GeneratorUnavailable)?;
        if !engine.has_code_generator() {
            return Err(Error::GeneratorUnavailable);
        }
        if engine.generate_stubs().is_empty() {
            debug!(path = %path.display(), "no interfaces to generate");
            return Ok(false);
        }
        engine.generate_code_file(&self.package_name, path)?;
        Ok(true)
    }
}
