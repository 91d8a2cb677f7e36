//! Deterministic course colors
//!
//! A course's color is derived from its normalized catalog number, so it stays the
//! same across sessions without being stored anywhere.

use serde::{Deserialize, Serialize};

const HASH_MODULUS: u32 = 997;

/// Color classes used when no palette is configured
pub const DEFAULT_COLORS: [&str; 8] = [
    "bg-amber-200/80 border-amber-600 text-amber-950",
    "bg-emerald-200/80 border-emerald-600 text-emerald-950",
    "bg-sky-200/80 border-sky-600 text-sky-950",
    "bg-orange-200/80 border-orange-600 text-orange-950",
    "bg-teal-200/80 border-teal-600 text-teal-950",
    "bg-lime-200/80 border-lime-600 text-lime-950",
    "bg-rose-200/80 border-rose-600 text-rose-950",
    "bg-cyan-200/80 border-cyan-600 text-cyan-950",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Palette must contain at least one color")]
    Empty,
}

/// Ordered list of color classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Palette index for a normalized catalog number
    pub fn index_for(&self, normalized_cat_no: &str) -> usize {
        hash_string(normalized_cat_no) as usize % self.colors.len()
    }

    /// Color class for a normalized catalog number
    pub fn color_for(&self, normalized_cat_no: &str) -> &str {
        &self.colors[self.index_for(normalized_cat_no)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// Rolling hash over UTF-16 code units, `hash = (hash * 31 + unit) % 997`
pub fn hash_string(value: &str) -> u32 {
    value
        .encode_utf16()
        .fold(0u32, |hash, unit| {
            (hash * 31 + u32::from(unit)) % HASH_MODULUS
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash_string(""), 0);
        assert_eq!(hash_string("A"), 65);
        // ((65 * 31) + 66) % 997 = 2081 % 997 = 87
        assert_eq!(hash_string("AB"), 87);
    }

    #[test]
    fn test_color_is_stable() {
        let palette = Palette::default();
        let first = palette.color_for("CSCI 20").to_string();
        for _ in 0..10 {
            assert_eq!(palette.color_for("CSCI 20"), first);
        }
    }

    #[test]
    fn test_sample_uses_more_than_one_bucket() {
        let palette = Palette::new(["a", "b", "c"]).unwrap();
        let depts = [
            "CSCI", "MATH", "CHEM", "BIO", "PHYS", "ENGL", "HIST", "PHILO", "THEO", "ECON",
        ];
        let buckets: HashSet<usize> = depts
            .iter()
            .flat_map(|dept| (1..=5).map(move |n| format!("{} {}", dept, n * 10)))
            .map(|code| palette.index_for(&code))
            .collect();
        assert!(buckets.len() > 1);
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(Vec::<String>::new()), Err(PaletteError::Empty));
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }

    #[test]
    fn test_single_color_palette() {
        let palette = Palette::new(["only"]).unwrap();
        assert_eq!(palette.color_for("ANYTHING 1"), "only");
    }
}
