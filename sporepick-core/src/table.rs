//! Named colour tables

use crate::colour::Rgb;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Index;

/// A named colour sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourSample {
    pub name: String,
    pub rgb: Rgb,
}

/// An ordered, immutable mapping from unique colour names to RGB triples
///
/// Insertion order is preserved: derived structures (reduced points, corner
/// lookups) index samples by position, so positions must correspond to names
/// stably for the lifetime of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColourSample>", into = "Vec<ColourSample>")]
pub struct ColourTable {
    samples: Vec<ColourSample>,
}

// from https://en.wikipedia.org/w/index.php?title=Template:Mycomorphbox&action=edit
const MYCOMORPHBOX: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("olive", [0x78, 0x88, 0x61]),
    ("olive-brown", [0x87, 0x81, 0x56]),
    ("brown", [0x5d, 0x43, 0x1f]),
    ("yellow", [0xf2, 0xef, 0xba]),
    ("pink", [0xf7, 0xcf, 0xca]),
    ("tan", [0xcb, 0xa7, 0x77]),
    ("salmon", [0xf6, 0xcf, 0xb3]),
    ("ochre", [0xcc, 0x77, 0x22]),
    ("cream", [0xfa, 0xf5, 0xe7]),
    ("buff", [0xeb, 0xd6, 0x9a]),
    ("blackish-brown", [0x27, 0x1c, 0x13]),
    ("reddish-brown", [0x67, 0x32, 0x1a]),
    ("pinkish-brown", [0xf4, 0xc6, 0xa6]),
    ("green", [0x7c, 0x8a, 0x68]),
    ("yellow-orange", [0xff, 0xbf, 0x68]),
    ("purple", [0x5a, 0x43, 0x64]),
    ("purple-black", [0x3b, 0x2a, 0x42]),
    ("purple-brown", [0x4b, 0x35, 0x45]),
    ("yellow-brown", [0xcb, 0x97, 0x35]),
];

impl ColourTable {
    /// Create a table from samples, rejecting duplicate names
    pub fn from_samples(samples: Vec<ColourSample>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(samples.len());
        for sample in &samples {
            if !seen.insert(sample.name.as_str()) {
                return Err(Error::InvalidData(format!(
                    "duplicate colour name '{}'",
                    sample.name
                )));
            }
        }
        Ok(Self { samples })
    }

    /// Create a table from (name, rgb) pairs
    pub fn from_pairs(pairs: &[(&str, [u8; 3])]) -> Result<Self> {
        let samples = pairs
            .iter()
            .map(|&(name, rgb)| ColourSample {
                name: name.to_string(),
                rgb: rgb.into(),
            })
            .collect();
        Self::from_samples(samples)
    }

    /// The built-in spore print colour table from the Wikipedia Mycomorphbox
    /// template
    pub fn mycomorphbox() -> Self {
        Self::from_pairs(MYCOMORPHBOX).expect("built-in table has unique names")
    }

    /// Number of samples in the table
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples in insertion order
    pub fn samples(&self) -> &[ColourSample] {
        &self.samples
    }

    /// Get an iterator over the samples
    pub fn iter(&self) -> std::slice::Iter<'_, ColourSample> {
        self.samples.iter()
    }

    /// Look up a sample by name
    pub fn get(&self, name: &str) -> Option<&ColourSample> {
        self.samples.iter().find(|s| s.name == name)
    }

    /// Position of the named sample in insertion order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.samples.iter().position(|s| s.name == name)
    }
}

impl Index<usize> for ColourTable {
    type Output = ColourSample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a ColourTable {
    type Item = &'a ColourSample;
    type IntoIter = std::slice::Iter<'a, ColourSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl TryFrom<Vec<ColourSample>> for ColourTable {
    type Error = Error;

    fn try_from(samples: Vec<ColourSample>) -> Result<Self> {
        Self::from_samples(samples)
    }
}

impl From<ColourTable> for Vec<ColourSample> {
    fn from(table: ColourTable) -> Self {
        table.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mycomorphbox_order_and_lookup() {
        let table = ColourTable::mycomorphbox();
        assert_eq!(table.len(), 21);
        assert_eq!(table[0].name, "black");
        assert_eq!(table[20].name, "yellow-brown");
        assert_eq!(table.index_of("ochre"), Some(9));
        assert_eq!(table.get("purple").unwrap().rgb, Rgb::new(90, 67, 100));
        assert_eq!(table.index_of("chartreuse"), None);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ColourTable::from_pairs(&[
            ("black", [0, 0, 0]),
            ("white", [255, 255, 255]),
            ("black", [1, 1, 1]),
        ]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_serde_round_trip() {
        let table = ColourTable::mycomorphbox();
        let json = serde_json::to_string(&table).unwrap();
        let back: ColourTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"name": "black", "rgb": {"r": 0, "g": 0, "b": 0}},
            {"name": "black", "rgb": {"r": 1, "g": 1, "b": 1}}
        ]"#;
        assert!(serde_json::from_str::<ColourTable>(json).is_err());
    }
}
