//! The closed catalog of phonological simplification processes.
//!
//! Every code belongs to one of three classes and is written as a dotted
//! tag: `E.n` for structure processes, `A.n` for assimilations and `S.n` for
//! substitutions. Tags round-trip through [`Display`](fmt::Display) and
//! [`FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Class of a process code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessClass {
    /// Syllable and word structure (`E.*`)
    Structure,
    /// Assimilation (`A.*`)
    Assimilation,
    /// Substitution (`S.*`)
    Substitution,
}

impl ProcessClass {
    /// The tag prefix letter.
    pub fn prefix(self) -> char {
        match self {
            ProcessClass::Structure => 'E',
            ProcessClass::Assimilation => 'A',
            ProcessClass::Substitution => 'S',
        }
    }

    /// Clinical label of the class.
    pub fn label(self) -> &'static str {
        match self {
            ProcessClass::Structure => "Estructura",
            ProcessClass::Assimilation => "Asimilación",
            ProcessClass::Substitution => "Sustitución",
        }
    }
}

macro_rules! process_codes {
    ($($variant:ident => ($class:ident, $num:literal, $label:literal),)+) => {
        /// A phonological simplification process.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ProcessCode {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl ProcessCode {
            /// The whole catalog in tag order.
            pub const ALL: &'static [ProcessCode] = &[$(ProcessCode::$variant,)+];

            /// Class the code belongs to.
            pub fn class(self) -> ProcessClass {
                match self {
                    $(ProcessCode::$variant => ProcessClass::$class,)+
                }
            }

            /// Number within the class (the `n` of `E.n`).
            pub fn number(self) -> u8 {
                match self {
                    $(ProcessCode::$variant => $num,)+
                }
            }

            /// Clinical label.
            pub fn label(self) -> &'static str {
                match self {
                    $(ProcessCode::$variant => $label,)+
                }
            }
        }
    };
}

process_codes! {
    ClusterReduction => (Structure, 1, "Reducción Grupo Consonántico"),
    DiphthongReduction => (Structure, 2, "Reducción Diptongo"),
    CodaDeletion => (Structure, 3, "Omisión Coda"),
    Coalescence => (Structure, 4, "Coalescencia"),
    UnstressedDeletion => (Structure, 5, "Omisión Elem. Átonos"),
    StressedDeletion => (Structure, 6, "Omisión Sílaba Tónica"),
    Addition => (Structure, 7, "Adición"),
    Metathesis => (Structure, 8, "Inversión"),
    IdentityAssimilation => (Assimilation, 1, "Asim. Idéntica"),
    LabialAssimilation => (Assimilation, 2, "Asim. Labial"),
    DentalAssimilation => (Assimilation, 3, "Asim. Dental"),
    PalatalAssimilation => (Assimilation, 4, "Asim. Palatal"),
    VelarAssimilation => (Assimilation, 5, "Asim. Velar"),
    LiquidAssimilation => (Assimilation, 6, "Asim. a Líquidos"),
    NasalAssimilation => (Assimilation, 7, "Asim. Nasal"),
    VowelAssimilation => (Assimilation, 8, "Asim. Vocálica"),
    SyllabicAssimilation => (Assimilation, 9, "Asim. Silábica"),
    Aspiration => (Substitution, 1, "Aspiración"),
    Posteriorization => (Substitution, 2, "Posteriorización"),
    Frontalization => (Substitution, 3, "Frontalización"),
    Labialization => (Substitution, 4, "Labialización"),
    Occlusivization => (Substitution, 5, "Oclusivización"),
    Fricativization => (Substitution, 6, "Fricativización"),
    Affrication => (Substitution, 7, "Africación"),
    Voicing => (Substitution, 8, "Sonorización"),
    Devoicing => (Substitution, 9, "Afonización"),
    SemiConsonantization => (Substitution, 10, "Semiconsonantización"),
    LiquidForLiquid => (Substitution, 11, "Sust. Líq. por Líq."),
    LiquidToNonLiquid => (Substitution, 12, "Sust. Líq. por No Líq."),
    NonLiquidToLiquid => (Substitution, 13, "Sust. No Líq. por Líq."),
    Nasalization => (Substitution, 14, "Nasalización"),
    Oralization => (Substitution, 15, "Oralización"),
    VowelSubstitution => (Substitution, 16, "Sust. Vocálica"),
    Deaffrication => (Substitution, 17, "Desafricación"),
}

impl ProcessCode {
    /// The dotted tag, e.g. `"E.1"`.
    pub fn tag(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProcessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class().prefix(), self.number())
    }
}

impl FromStr for ProcessCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidProcessCode(s.to_string());
        let (prefix, number) = s.trim().split_once('.').ok_or_else(invalid)?;
        let class = match prefix {
            "E" | "e" => ProcessClass::Structure,
            "A" | "a" => ProcessClass::Assimilation,
            "S" | "s" => ProcessClass::Substitution,
            _ => return Err(invalid()),
        };
        let number: u8 = number.parse().map_err(|_| invalid())?;
        ProcessCode::ALL
            .iter()
            .copied()
            .find(|code| code.class() == class && code.number() == number)
            .ok_or_else(invalid)
    }
}

impl Serialize for ProcessCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProcessCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_per_class() {
        let count = |class| ProcessCode::ALL.iter().filter(|c| c.class() == class).count();
        assert_eq!(ProcessCode::ALL.len(), 34);
        assert_eq!(count(ProcessClass::Structure), 8);
        assert_eq!(count(ProcessClass::Assimilation), 9);
        assert_eq!(count(ProcessClass::Substitution), 17);
    }

    #[test]
    fn test_tags_are_unique_and_parse_back() {
        for (i, code) in ProcessCode::ALL.iter().enumerate() {
            assert_eq!(code.tag().parse::<ProcessCode>().unwrap(), *code);
            for other in &ProcessCode::ALL[i + 1..] {
                assert_ne!(code.tag(), other.tag());
            }
        }
    }

    #[test]
    fn test_display_and_label() {
        assert_eq!(ProcessCode::ClusterReduction.to_string(), "E.1");
        assert_eq!(ProcessCode::SyllabicAssimilation.to_string(), "A.9");
        assert_eq!(ProcessCode::Deaffrication.to_string(), "S.17");
        assert_eq!(ProcessCode::Devoicing.label(), "Afonización");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("E.9".parse::<ProcessCode>().is_err());
        assert!("X.1".parse::<ProcessCode>().is_err());
        assert!("E1".parse::<ProcessCode>().is_err());
        assert!("".parse::<ProcessCode>().is_err());
        assert_eq!(" s.11 ".parse::<ProcessCode>().unwrap(), ProcessCode::LiquidForLiquid);
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&ProcessCode::Coalescence).unwrap();
        assert_eq!(json, "\"E.4\"");
        let back: ProcessCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProcessCode::Coalescence);
    }
}
