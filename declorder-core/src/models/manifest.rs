//! Pre-extracted declaration manifests.

use super::declaration::{
    ConstantDecl, FunctionDecl, ImportDecl, InterfaceDecl, StructDecl, VariableDecl,
};
use super::kind::DeclarationKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarations of one source unit, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationManifest {
    /// Unit name, used for report headings and the generated file name
    pub unit: String,
    /// Package applied to records that leave theirs empty
    pub package: String,
    pub structs: Vec<StructDecl>,
    pub interfaces: Vec<InterfaceDecl>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
    pub constants: Vec<ConstantDecl>,
    pub imports: Vec<ImportDecl>,
}

/// A manifest record tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    Struct(StructDecl),
    Interface(InterfaceDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Constant(ConstantDecl),
    Import(ImportDecl),
}

impl ManifestEntry {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            ManifestEntry::Struct(_) => DeclarationKind::Struct,
            ManifestEntry::Interface(_) => DeclarationKind::Interface,
            ManifestEntry::Function(_) => DeclarationKind::Function,
            ManifestEntry::Variable(_) => DeclarationKind::Variable,
            ManifestEntry::Constant(_) => DeclarationKind::Constant,
            ManifestEntry::Import(_) => DeclarationKind::Import,
        }
    }
}

impl DeclarationManifest {
    /// Load a manifest from a TOML, JSON or YAML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let mut manifest: Self = declorder_utils::load_config(path)?;
        if manifest.unit.is_empty() {
            manifest.unit = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        manifest.fill_packages();
        Ok(manifest)
    }

    /// Give records without a package the manifest's package
    pub fn fill_packages(&mut self) {
        let package = self.package.clone();
        let fill = |record_package: &mut String| {
            if record_package.is_empty() {
                record_package.clone_from(&package);
            }
        };
        self.structs.iter_mut().for_each(|d| fill(&mut d.package));
        self.interfaces.iter_mut().for_each(|d| fill(&mut d.package));
        self.functions.iter_mut().for_each(|d| fill(&mut d.package));
        self.variables.iter_mut().for_each(|d| fill(&mut d.package));
        self.constants.iter_mut().for_each(|d| fill(&mut d.package));
        self.imports.iter_mut().for_each(|d| fill(&mut d.package));
    }

    /// Records of one kind, wrapped as entries, in manifest order
    pub fn entries(&self, kind: DeclarationKind) -> Vec<ManifestEntry> {
        match kind {
            DeclarationKind::Struct => self.structs.iter().cloned().map(ManifestEntry::Struct).collect(),
            DeclarationKind::Interface => self.interfaces.iter().cloned().map(ManifestEntry::Interface).collect(),
            DeclarationKind::Function => self.functions.iter().cloned().map(ManifestEntry::Function).collect(),
            DeclarationKind::Variable => self.variables.iter().cloned().map(ManifestEntry::Variable).collect(),
            DeclarationKind::Constant => self.constants.iter().cloned().map(ManifestEntry::Constant).collect(),
            DeclarationKind::Import => self.imports.iter().cloned().map(ManifestEntry::Import).collect(),
        }
    }

    pub fn total_records(&self) -> usize {
        self.structs.len()
            + self.interfaces.len()
            + self.functions.len()
            + self.variables.len()
            + self.constants.len()
            + self.imports.len()
    }
}
