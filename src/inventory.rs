//! The fixed 37-item word inventory and the two test modes.
//!
//! Each item stores its phonemic syllabification and stressed syllable. The
//! syllables are written in the phonemic alphabet, so their concatenation is
//! exactly `normalize(word)`; the syllabifier's exception table is built
//! from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One test item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordSpec {
    /// Item number, 1-37
    pub number: u8,
    /// Orthographic form
    pub word: &'static str,
    /// Canonical phonemic syllables
    pub syllables: &'static [&'static str],
    /// Index of the stressed syllable
    pub stressed: usize,
}

impl WordSpec {
    /// The phonemic form of the word (the concatenated syllables).
    pub fn phonemic(&self) -> String {
        self.syllables.concat()
    }

    /// The stressed syllable, if the index is in range.
    pub fn stressed_syllable(&self) -> Option<&'static str> {
        self.syllables.get(self.stressed).copied()
    }

    /// Syllables as owned strings.
    pub fn syllable_vec(&self) -> Vec<String> {
        self.syllables.iter().map(|s| s.to_string()).collect()
    }
}

const fn item(
    number: u8,
    word: &'static str,
    syllables: &'static [&'static str],
    stressed: usize,
) -> WordSpec {
    WordSpec {
        number,
        word,
        syllables,
        stressed,
    }
}

/// All 37 items in administration order.
pub static INVENTORY: [WordSpec; 37] = [
    item(1, "plancha", &["plan", "ĉa"], 0),
    item(2, "rueda", &["rue", "da"], 0),
    item(3, "mariposa", &["ma", "ri", "po", "sa"], 2),
    item(4, "bicicleta", &["bi", "si", "kle", "ta"], 2),
    item(5, "helicóptero", &["e", "li", "kop", "te", "ro"], 2),
    item(6, "bufanda", &["bu", "fan", "da"], 1),
    item(7, "caperucita", &["ka", "pe", "ru", "si", "ta"], 3),
    item(8, "alfombra", &["al", "fom", "bra"], 1),
    item(9, "refrigerador", &["re", "fri", "xe", "ra", "dor"], 4),
    item(10, "edificio", &["e", "di", "fi", "sio"], 2),
    item(11, "calcetín", &["kal", "se", "tin"], 2),
    item(12, "dinosaurio", &["di", "no", "sau", "rio"], 2),
    item(13, "teléfono", &["te", "le", "fo", "no"], 1),
    item(14, "remedio", &["re", "me", "dio"], 1),
    item(15, "peineta", &["pei", "ne", "ta"], 1),
    item(16, "auto", &["au", "to"], 0),
    item(17, "indio", &["in", "dio"], 0),
    item(18, "pantalón", &["pan", "ta", "lon"], 2),
    item(19, "camión", &["ka", "mion"], 1),
    item(20, "cuaderno", &["kua", "der", "no"], 1),
    item(21, "micro", &["mi", "kro"], 0),
    item(22, "tren", &["tren"], 0),
    item(23, "plátano", &["pla", "ta", "no"], 0),
    item(24, "jugo", &["xu", "go"], 0),
    item(25, "enchufe", &["en", "ĉu", "fe"], 1),
    item(26, "jabón", &["xa", "bon"], 1),
    item(27, "tambor", &["tam", "bor"], 1),
    item(28, "volantín", &["bo", "lan", "tin"], 2),
    item(29, "jirafa", &["xi", "ra", "fa"], 1),
    item(30, "gorro", &["go", "Ro"], 0),
    item(31, "árbol", &["ar", "bol"], 0),
    item(32, "dulce", &["dul", "se"], 0),
    item(33, "guitarra", &["gui", "ta", "Ra"], 1),
    item(34, "guante", &["guan", "te"], 0),
    item(35, "reloj", &["re", "lox"], 1),
    item(36, "jaula", &["xau", "la"], 0),
    item(37, "puente", &["puen", "te"], 0),
];

/// Look up an item by its number (1-37).
pub fn word_spec(number: u8) -> Option<&'static WordSpec> {
    INVENTORY.iter().find(|w| w.number == number)
}

/// Test administration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// Screening with the first 15 items ("Barrido")
    Short,
    /// Complete test with all 37 items ("Completo")
    Full,
}

impl TestMode {
    /// Number of items administered in this mode.
    pub fn item_count(self) -> usize {
        match self {
            TestMode::Short => 15,
            TestMode::Full => INVENTORY.len(),
        }
    }

    /// The items administered in this mode, in order.
    pub fn items(self) -> &'static [WordSpec] {
        &INVENTORY[..self.item_count()]
    }

    /// Clinical name of the mode.
    pub fn label(self) -> &'static str {
        match self {
            TestMode::Short => "Barrido",
            TestMode::Full => "Completo",
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestMode::Short => write!(f, "short"),
            TestMode::Full => write!(f, "full"),
        }
    }
}

impl FromStr for TestMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "barrido" => Ok(TestMode::Short),
            "full" | "completo" => Ok(TestMode::Full),
            _ => Err(Error::InvalidTestMode(s.to_string())),
        }
    }
}
