//! Stylesheets for pedigree charts
//!
//! A stylesheet maps symbolic color names to concrete values and lists the
//! highlight palette for duplicate ancestors. Palette entries may be concrete
//! colors or names from `[colors]`.
//!
//! ```toml
//! [metadata]
//! name = "Print"
//!
//! [colors]
//! dup-1 = "#ffd0d0"
//!
//! [highlight]
//! palette = ["dup-1", "#c0f0c0"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::pedigree::{Palette, PaletteError, DEFAULT_PALETTE};

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid highlight palette: {0}")]
    Palette(#[from] PaletteError),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
    /// Highlight palette entries, in assignment order
    pub highlight: Vec<String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
    highlight: Option<TomlHighlight>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlHighlight {
    palette: Vec<String>,
}

/// Default colors for slot boxes, text and connectors
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("slot-fill", "#ffffff"),
    ("slot-border", "#cccccc"),
    ("header-fill", "#e8e8e8"),
    ("unknown-fill", "#f5f5f5"),
    ("unknown-text", "#999999"),
    ("connector", "#666666"),
    ("text-1", "#333333"),
    ("text-2", "#666666"),
];

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load stylesheet from TOML string
    ///
    /// A `[highlight]` table, when present, must hold a valid palette.
    pub fn from_toml_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        let declares_palette = parsed.highlight.is_some();

        let stylesheet = Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
            highlight: parsed.highlight.map(|h| h.palette).unwrap_or_default(),
        };
        if declares_palette {
            if stylesheet.highlight.is_empty() {
                return Err(PaletteError::Empty.into());
            }
            stylesheet.palette()?;
        }
        Ok(stylesheet)
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to the default stylesheet
    pub fn resolve_or_default(&self, token: &str) -> Option<&str> {
        self.resolve(token).or_else(|| {
            DEFAULT_COLORS
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, color)| *color)
        })
    }

    /// Highlight palette with symbolic entries resolved to concrete colors
    ///
    /// Entries that name no color in this or the default stylesheet are taken
    /// literally. Falls back to the default palette when the stylesheet lists
    /// none.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        if self.highlight.is_empty() {
            return Ok(Palette::default());
        }
        Palette::new(self.highlight.iter().map(|entry| {
            self.resolve_or_default(entry)
                .unwrap_or(entry.as_str())
                .to_string()
        }))
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            name: Some("default".to_string()),
            description: None,
            colors: DEFAULT_COLORS
                .iter()
                .map(|(name, color)| (name.to_string(), color.to_string()))
                .collect(),
            highlight: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}
