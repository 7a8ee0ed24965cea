//! Static lookup tables: grades, quarters, academic years, WAYS requirements
//! and workload classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Units needed to graduate.
pub const GRADUATION_UNITS: u32 = 180;

/// Smallest unit value a course may carry.
pub const MIN_UNITS: u32 = 1;
/// Largest unit value a course may carry.
pub const MAX_UNITS: u32 = 20;
/// Smallest weekly hour load a course may carry.
pub const MIN_HOURS: u32 = 1;
/// Largest weekly hour load a course may carry.
pub const MAX_HOURS: u32 = 100;

/// Units pre-filled in a fresh course draft.
pub const DEFAULT_UNITS: u32 = 3;
/// Weekly hours pre-filled in a fresh course draft.
pub const DEFAULT_HOURS: u32 = 9;

/// Letter grades plus the "not graded" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    /// A+ (4.2)
    #[serde(rename = "A+")]
    APlus,
    /// A (4.0)
    #[serde(rename = "A")]
    A,
    /// A- (3.7)
    #[serde(rename = "A-")]
    AMinus,
    /// B+ (3.3)
    #[serde(rename = "B+")]
    BPlus,
    /// B (3.0)
    #[serde(rename = "B")]
    B,
    /// B- (2.7)
    #[serde(rename = "B-")]
    BMinus,
    /// C+ (2.3)
    #[serde(rename = "C+")]
    CPlus,
    /// C (2.0)
    #[serde(rename = "C")]
    C,
    /// C- (1.7)
    #[serde(rename = "C-")]
    CMinus,
    /// D+ (1.3)
    #[serde(rename = "D+")]
    DPlus,
    /// D (1.0)
    #[serde(rename = "D")]
    D,
    /// D- (0.7)
    #[serde(rename = "D-")]
    DMinus,
    /// F (0.0) still counts as completed units
    #[serde(rename = "F")]
    F,
    /// Not graded yet; excluded from GPA and completed units
    #[default]
    #[serde(rename = "N/A")]
    NotGraded,
}

impl Grade {
    /// Every grade in display order.
    pub const ALL: [Self; 14] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::DMinus,
        Self::F,
        Self::NotGraded,
    ];

    /// Grade points in tenths (A+ is 42), or `None` for the unweighted sentinel.
    #[must_use]
    pub const fn tenths(self) -> Option<u32> {
        match self {
            Self::APlus => Some(42),
            Self::A => Some(40),
            Self::AMinus => Some(37),
            Self::BPlus => Some(33),
            Self::B => Some(30),
            Self::BMinus => Some(27),
            Self::CPlus => Some(23),
            Self::C => Some(20),
            Self::CMinus => Some(17),
            Self::DPlus => Some(13),
            Self::D => Some(10),
            Self::DMinus => Some(7),
            Self::F => Some(0),
            Self::NotGraded => None,
        }
    }

    /// Grade points, or `None` for the unweighted sentinel.
    #[must_use]
    pub fn points(self) -> Option<f64> {
        self.tenths().map(|tenths| f64::from(tenths) / 10.0)
    }

    /// Whether this is anything other than the "not graded" sentinel.
    #[must_use]
    pub const fn is_graded(self) -> bool {
        !matches!(self, Self::NotGraded)
    }

    /// Label as written on a transcript.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::NotGraded => "N/A",
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.label() == wanted)
            .ok_or_else(|| format!("Unknown grade: {s}"))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Academic quarters in calendar order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Quarter {
    /// Autumn quarter
    #[default]
    Autumn,
    /// Winter quarter
    Winter,
    /// Spring quarter
    Spring,
    /// Summer quarter
    Summer,
}

impl Quarter {
    /// Every quarter in calendar order.
    pub const ALL: [Self; 4] = [Self::Autumn, Self::Winter, Self::Spring, Self::Summer];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "autumn" | "fall" | "aut" => Ok(Self::Autumn),
            "winter" | "win" => Ok(Self::Winter),
            "spring" | "spr" => Ok(Self::Spring),
            "summer" | "sum" => Ok(Self::Summer),
            _ => Err(format!("Unknown quarter: {s}")),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Academic year level, stored as `"1"`..`"4"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Year {
    /// Year 1
    #[default]
    #[serde(rename = "1")]
    Freshman,
    /// Year 2
    #[serde(rename = "2")]
    Sophomore,
    /// Year 3
    #[serde(rename = "3")]
    Junior,
    /// Year 4
    #[serde(rename = "4")]
    Senior,
}

impl Year {
    /// Every year level in order.
    pub const ALL: [Self; 4] = [Self::Freshman, Self::Sophomore, Self::Junior, Self::Senior];

    /// One-based year index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Freshman => 1,
            Self::Sophomore => 2,
            Self::Junior => 3,
            Self::Senior => 4,
        }
    }

    /// Display name (Freshman..Senior).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Freshman => "Freshman",
            Self::Sophomore => "Sophomore",
            Self::Junior => "Junior",
            Self::Senior => "Senior",
        }
    }
}

impl FromStr for Year {
    type Err = String;

    /// Accepts either the index (`"2"`) or the name (`"sophomore"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|year| {
                year.index().to_string() == wanted || year.name().to_ascii_lowercase() == wanted
            })
            .ok_or_else(|| format!("Unknown academic year: {s}"))
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// WAYS breadth requirement categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaysCategory {
    /// Aesthetic and Interpretive Inquiry
    #[serde(rename = "AII")]
    Aii,
    /// Social Inquiry
    #[serde(rename = "SI")]
    Si,
    /// Scientific Method and Analysis
    #[serde(rename = "SMA")]
    Sma,
    /// Creative Expression (counted in units)
    #[serde(rename = "CE")]
    Ce,
    /// Applied Quantitative Reasoning
    #[serde(rename = "AQR")]
    Aqr,
    /// Formal Reasoning
    #[serde(rename = "FR")]
    Fr,
    /// Ethical Reasoning
    #[serde(rename = "ER")]
    Er,
    /// Exploring Difference and Power
    #[serde(rename = "EDP")]
    Edp,
}

impl WaysCategory {
    /// Every category in requirement-sheet order.
    pub const ALL: [Self; 8] = [
        Self::Aii,
        Self::Si,
        Self::Sma,
        Self::Ce,
        Self::Aqr,
        Self::Fr,
        Self::Er,
        Self::Edp,
    ];

    /// Short key used in saved data (`"AII"`, `"CE"`, ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Aii => "AII",
            Self::Si => "SI",
            Self::Sma => "SMA",
            Self::Ce => "CE",
            Self::Aqr => "AQR",
            Self::Fr => "FR",
            Self::Er => "ER",
            Self::Edp => "EDP",
        }
    }

    /// Full requirement name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aii => "Aesthetic and Interpretive Inquiry",
            Self::Si => "Social Inquiry",
            Self::Sma => "Scientific Method and Analysis",
            Self::Ce => "Creative Expression",
            Self::Aqr => "Applied Quantitative Reasoning",
            Self::Fr => "Formal Reasoning",
            Self::Er => "Ethical Reasoning",
            Self::Edp => "Exploring Difference and Power",
        }
    }

    /// Required course count, or required units for [`is_unit_weighted`](Self::is_unit_weighted).
    #[must_use]
    pub const fn required(self) -> u32 {
        match self {
            Self::Aii | Self::Si | Self::Sma | Self::Ce => 2,
            Self::Aqr | Self::Fr | Self::Er | Self::Edp => 1,
        }
    }

    /// Creative Expression accumulates units instead of course count.
    #[must_use]
    pub const fn is_unit_weighted(self) -> bool {
        matches!(self, Self::Ce)
    }
}

impl FromStr for WaysCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|way| way.key() == wanted)
            .ok_or_else(|| format!("Unknown WAYS category: {s}"))
    }
}

impl fmt::Display for WaysCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How alarming a workload label is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Sustainable
    Ok,
    /// Heavy but manageable
    Caution,
    /// Overloaded
    Alert,
}

/// Workload "happiness" label for a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Happiness {
    /// Up to 40 weekly hours
    Happy,
    /// Up to 50 weekly hours
    Medium,
    /// More than 50 weekly hours
    Sad,
}

impl Happiness {
    /// Label shown next to the term.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Medium => "Medium",
            Self::Sad => "Sad",
        }
    }

    /// Label with its face, for terminal output.
    #[must_use]
    pub const fn emoji_label(self) -> &'static str {
        match self {
            Self::Happy => "Happy 😃",
            Self::Medium => "Medium 😐",
            Self::Sad => "Sad 😞",
        }
    }

    /// Severity of this label, as listed in [`WORKLOAD_THRESHOLDS`].
    #[must_use]
    pub fn severity(self) -> Severity {
        WORKLOAD_THRESHOLDS
            .iter()
            .find(|threshold| threshold.label == self)
            .map_or(Severity::Alert, |threshold| threshold.severity)
    }
}

impl fmt::Display for Happiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the workload table: hours up to `max_hours` (inclusive) earn `label`
/// at `severity`. `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadThreshold {
    /// Inclusive upper bound on summed weekly hours
    pub max_hours: Option<u32>,
    /// Label earned when the bound holds
    pub label: Happiness,
    /// How alarming the label is
    pub severity: Severity,
}

/// Workload thresholds, checked in order. The last one always matches.
pub const WORKLOAD_THRESHOLDS: [WorkloadThreshold; 3] = [
    WorkloadThreshold {
        max_hours: Some(40),
        label: Happiness::Happy,
        severity: Severity::Ok,
    },
    WorkloadThreshold {
        max_hours: Some(50),
        label: Happiness::Medium,
        severity: Severity::Caution,
    },
    WorkloadThreshold {
        max_hours: None,
        label: Happiness::Sad,
        severity: Severity::Alert,
    },
];

/// The first workload row whose bound holds for `total_hours`.
#[must_use]
pub fn workload_threshold(total_hours: u32) -> &'static WorkloadThreshold {
    WORKLOAD_THRESHOLDS
        .iter()
        .find(|threshold| threshold.max_hours.is_none_or(|max| total_hours <= max))
        .unwrap_or(&WORKLOAD_THRESHOLDS[WORKLOAD_THRESHOLDS.len() - 1])
}

/// Classify a term's summed weekly hours.
#[must_use]
pub fn classify_workload(total_hours: u32) -> Happiness {
    workload_threshold(total_hours).label
}
