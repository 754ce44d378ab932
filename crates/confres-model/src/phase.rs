//! Seismic phase codes usable as selector values and constraint payloads

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Enumerated phase type.
///
/// Labels are case sensitive (`Pg` and `PG` are different phases in the
/// naming convention), so parsing matches the label exactly.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseType {
    P,
    Pn,
    Pg,
    Pb,
    pP,
    sP,
    PcP,
    PKP,
    PKiKP,
    PKPdf,
    PKPbc,
    PKPab,
    S,
    Sn,
    Sg,
    Sb,
    sS,
    ScS,
    ScP,
    SKS,
    Lg,
    Rg,
    LR,
    LQ,
    T,
    I,
    Unknown,
}

impl PhaseType {
    /// Every phase type, in declaration order
    pub const ALL: [PhaseType; 27] = [
        PhaseType::P,
        PhaseType::Pn,
        PhaseType::Pg,
        PhaseType::Pb,
        PhaseType::pP,
        PhaseType::sP,
        PhaseType::PcP,
        PhaseType::PKP,
        PhaseType::PKiKP,
        PhaseType::PKPdf,
        PhaseType::PKPbc,
        PhaseType::PKPab,
        PhaseType::S,
        PhaseType::Sn,
        PhaseType::Sg,
        PhaseType::Sb,
        PhaseType::sS,
        PhaseType::ScS,
        PhaseType::ScP,
        PhaseType::SKS,
        PhaseType::Lg,
        PhaseType::Rg,
        PhaseType::LR,
        PhaseType::LQ,
        PhaseType::T,
        PhaseType::I,
        PhaseType::Unknown,
    ];

    /// The wire label of this phase
    pub fn label(&self) -> &'static str {
        match self {
            PhaseType::P => "P",
            PhaseType::Pn => "Pn",
            PhaseType::Pg => "Pg",
            PhaseType::Pb => "Pb",
            PhaseType::pP => "pP",
            PhaseType::sP => "sP",
            PhaseType::PcP => "PcP",
            PhaseType::PKP => "PKP",
            PhaseType::PKiKP => "PKiKP",
            PhaseType::PKPdf => "PKPdf",
            PhaseType::PKPbc => "PKPbc",
            PhaseType::PKPab => "PKPab",
            PhaseType::S => "S",
            PhaseType::Sn => "Sn",
            PhaseType::Sg => "Sg",
            PhaseType::Sb => "Sb",
            PhaseType::sS => "sS",
            PhaseType::ScS => "ScS",
            PhaseType::ScP => "ScP",
            PhaseType::SKS => "SKS",
            PhaseType::Lg => "Lg",
            PhaseType::Rg => "Rg",
            PhaseType::LR => "LR",
            PhaseType::LQ => "LQ",
            PhaseType::T => "T",
            PhaseType::I => "I",
            PhaseType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhaseType::ALL
            .iter()
            .copied()
            .find(|phase| phase.label() == s)
            .ok_or_else(|| Error::UnknownPhase {
                label: s.to_string(),
            })
    }
}

impl Serialize for PhaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PhaseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
