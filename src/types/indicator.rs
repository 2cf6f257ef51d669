use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Screening indicator identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    ReturnsVsBtc,
    MansfieldRs,
    Roc,
    Vwap,
}

impl IndicatorKind {
    /// Every indicator the screener knows, in display order.
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::ReturnsVsBtc,
        IndicatorKind::MansfieldRs,
        IndicatorKind::Roc,
        IndicatorKind::Vwap,
    ];

    /// Parse from an indicator id. Matching is exact.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rsi" => Some(Self::Rsi),
            "returns_vs_btc" => Some(Self::ReturnsVsBtc),
            "mansfield_rs" => Some(Self::MansfieldRs),
            "roc" => Some(Self::Roc),
            "vwap" => Some(Self::Vwap),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Rsi => "rsi",
            Self::ReturnsVsBtc => "returns_vs_btc",
            Self::MansfieldRs => "mansfield_rs",
            Self::Roc => "roc",
            Self::Vwap => "vwap",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rsi => "Relative Strength Index",
            Self::ReturnsVsBtc => "24h Returns vs Bitcoin",
            Self::MansfieldRs => "Mansfield Relative Strength",
            Self::Roc => "Rate of Change",
            Self::Vwap => "Volume Weighted Average Price",
        }
    }

    /// Whether a higher value ranks first.
    ///
    /// VWAP is a raw price here, so it has no "higher is better" reading and
    /// falls back to ascending order.
    pub fn ranks_descending(&self) -> bool {
        !matches!(self, Self::Vwap)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Description for an indicator id that may not be known.
pub fn describe_indicator(name: &str) -> &'static str {
    IndicatorKind::from_str(name)
        .map(|kind| kind.description())
        .unwrap_or("Unknown indicator")
}

/// A computed indicator value with its qualitative signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorValue {
    pub indicator: IndicatorKind,
    pub value: f64,
    pub signal: &'static str,
}

/// Indicator values computed for one coin. Absent entries were omitted
/// because an input was missing; they are never stand-ins for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorSet(BTreeMap<IndicatorKind, f64>);

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: IndicatorKind, value: f64) {
        self.0.insert(kind, value);
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Indicator id and description, as listed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    pub id: &'static str,
    pub description: &'static str,
}

impl From<IndicatorKind> for IndicatorInfo {
    fn from(kind: IndicatorKind) -> Self {
        Self {
            id: kind.id(),
            description: kind.description(),
        }
    }
}
