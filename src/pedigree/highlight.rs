//! Highlight tokens for duplicate ancestors

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::registry::IndividualId;

use super::common::DuplicateGroup;

/// Light header fills, one per duplicate group before the palette repeats
pub const DEFAULT_PALETTE: &[&str] = &[
    "#ffc8c8", "#90ee90", "#add8e6", "#ffe4b5", "#d8bfd8", "#f0e68c", "#afeeee", "#ffdab9",
];

/// An opaque marker a renderer maps to a visual style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HighlightToken(pub String);

impl HighlightToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HighlightToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors when building a palette
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("highlight palette is empty")]
    Empty,

    #[error("highlight palette repeats token '{0}'")]
    DuplicateToken(String),
}

/// Ordered list of distinct highlight tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    tokens: Vec<HighlightToken>,
}

impl Palette {
    /// Create a palette, rejecting empty lists and repeated tokens
    pub fn new<I, T>(tokens: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens: Vec<HighlightToken> = tokens
            .into_iter()
            .map(|t| HighlightToken(t.into()))
            .collect();
        if tokens.is_empty() {
            return Err(PaletteError::Empty);
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(PaletteError::DuplicateToken(token.0.clone()));
            }
        }
        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token for the group at `position`, cycling through the palette
    pub fn token(&self, position: usize) -> &HighlightToken {
        &self.tokens[position % self.tokens.len()]
    }

    pub fn tokens(&self) -> &[HighlightToken] {
        &self.tokens
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_PALETTE.iter().map(|t| HighlightToken::new(*t)).collect(),
        }
    }
}

/// Highlight token per duplicate ancestor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightMap {
    tokens: HashMap<IndividualId, HighlightToken>,
}

impl HighlightMap {
    pub fn get(&self, id: IndividualId) -> Option<&HighlightToken> {
        self.tokens.get(&id)
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.tokens.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Assign each group the palette token at its position in `groups`.
pub fn assign_highlights(groups: &[DuplicateGroup], palette: &Palette) -> HighlightMap {
    let tokens = groups
        .iter()
        .enumerate()
        .map(|(position, group)| (group.id, palette.token(position).clone()))
        .collect();
    HighlightMap { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::SlotCoord;

    fn group(id: u64) -> DuplicateGroup {
        DuplicateGroup {
            id: IndividualId(id),
            occurrences: vec![SlotCoord::new(3, 0), SlotCoord::new(4, 4)],
        }
    }

    #[test]
    fn test_palette_validation() {
        assert_eq!(Palette::new(Vec::<String>::new()), Err(PaletteError::Empty));
        assert_eq!(
            Palette::new(["red", "blue", "red"]),
            Err(PaletteError::DuplicateToken("red".to_string()))
        );
        assert_eq!(Palette::new(["red", "blue"]).unwrap().len(), 2);
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(palette.token(0).as_str(), "#ffc8c8");
        assert!(Palette::new(DEFAULT_PALETTE.iter().copied()).is_ok());
    }

    #[test]
    fn test_assignment_cycles() {
        let palette = Palette::new(["a", "b"]).unwrap();
        let groups = vec![group(10), group(20), group(30)];
        let map = assign_highlights(&groups, &palette);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(IndividualId(10)).unwrap().as_str(), "a");
        assert_eq!(map.get(IndividualId(20)).unwrap().as_str(), "b");
        assert_eq!(map.get(IndividualId(30)).unwrap().as_str(), "a");
        assert!(!map.contains(IndividualId(40)));
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let palette = Palette::default();
        let groups = vec![group(5), group(3), group(9)];
        assert_eq!(
            assign_highlights(&groups, &palette),
            assign_highlights(&groups, &palette)
        );
    }

    #[test]
    fn test_no_groups_no_highlights() {
        assert!(assign_highlights(&[], &Palette::default()).is_empty());
    }
}
