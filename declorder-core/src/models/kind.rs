//! Declaration kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six declaration kinds, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DeclarationKind {
    #[serde(rename = "structs", alias = "struct")]
    Struct,
    #[serde(rename = "interfaces", alias = "interface")]
    Interface,
    #[serde(rename = "functions", alias = "function")]
    Function,
    #[serde(rename = "variables", alias = "variable")]
    Variable,
    #[serde(rename = "constants", alias = "constant")]
    Constant,
    #[serde(rename = "imports", alias = "import")]
    Import,
}

impl DeclarationKind {
    /// Every kind, in report order
    pub const ALL: [DeclarationKind; 6] = [
        DeclarationKind::Struct,
        DeclarationKind::Interface,
        DeclarationKind::Function,
        DeclarationKind::Variable,
        DeclarationKind::Constant,
        DeclarationKind::Import,
    ];

    /// Plural lowercase name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Struct => "structs",
            DeclarationKind::Interface => "interfaces",
            DeclarationKind::Function => "functions",
            DeclarationKind::Variable => "variables",
            DeclarationKind::Constant => "constants",
            DeclarationKind::Import => "imports",
        }
    }

    /// Heading used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Struct => "Structs",
            DeclarationKind::Interface => "Interfaces",
            DeclarationKind::Function => "Functions",
            DeclarationKind::Variable => "Variables",
            DeclarationKind::Constant => "Constants",
            DeclarationKind::Import => "Imports",
        }
    }

    /// Section heading, e.g. `--- Structs (Dependency Order) ---`
    pub fn heading(&self) -> String {
        format!("--- {} (Dependency Order) ---", self.display_name())
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeclarationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structs" | "struct" => Ok(DeclarationKind::Struct),
            "interfaces" | "interface" => Ok(DeclarationKind::Interface),
            "functions" | "function" => Ok(DeclarationKind::Function),
            "variables" | "variable" => Ok(DeclarationKind::Variable),
            "constants" | "constant" => Ok(DeclarationKind::Constant),
            "imports" | "import" => Ok(DeclarationKind::Import),
            _ => Err(format!(
                "Unknown declaration kind: '{s}'. Valid options: structs, interfaces, functions, variables, constants, imports"
            )),
        }
    }
}
