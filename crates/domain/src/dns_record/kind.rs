use super::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal colors a cell can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    Yellow,
    Green,
    Orange,
    Blue,
    Purple,
    Red,
    Aqua,
    White,
}

/// Tracked row groups of the monitor grid.
///
/// Each kind is queried with one [`RecordType`]; `Ip` is the address of each
/// nameserver and therefore shares the `A` query type with the domain's own
/// `A` records while keeping a separate history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "SOA")]
    Soa,
    #[serde(rename = "IP")]
    Ip,
    #[serde(rename = "PTR")]
    Ptr,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "TXT")]
    Txt,
}

impl RecordKind {
    /// Grid order, top to bottom.
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Ns,
            RecordKind::Soa,
            RecordKind::Ip,
            RecordKind::Ptr,
            RecordKind::A,
            RecordKind::Mx,
            RecordKind::Txt,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Ns => "NS",
            RecordKind::Soa => "SOA",
            RecordKind::Ip => "IP",
            RecordKind::Ptr => "PTR",
            RecordKind::A => "A",
            RecordKind::Mx => "MX",
            RecordKind::Txt => "TXT",
        }
    }

    /// Row label prefix shown in column 0
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Ns => "NS Server",
            RecordKind::Soa => "SOA Serial",
            RecordKind::Ip => "IP Address",
            RecordKind::Ptr => "PTR Record",
            RecordKind::A => "A Record",
            RecordKind::Mx => "MX Record",
            RecordKind::Txt => "TXT Record",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            RecordKind::Ns => DisplayColor::Green,
            RecordKind::Soa => DisplayColor::Orange,
            RecordKind::Ip => DisplayColor::Blue,
            RecordKind::Ptr => DisplayColor::Purple,
            RecordKind::A => DisplayColor::Red,
            RecordKind::Mx => DisplayColor::Aqua,
            RecordKind::Txt => DisplayColor::White,
        }
    }

    pub fn query_type(&self) -> RecordType {
        match self {
            RecordKind::Ns => RecordType::NS,
            RecordKind::Soa => RecordType::SOA,
            RecordKind::Ip | RecordKind::A => RecordType::A,
            RecordKind::Ptr => RecordType::PTR,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Txt => RecordType::TXT,
        }
    }

    pub fn row_label(&self, slot: usize) -> String {
        format!("{} #{}", self.label(), slot + 1)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
