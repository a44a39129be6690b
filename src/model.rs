// src/model.rs
use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

/// One `(label, status word)` pair as it appeared on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawStatusRecord {
    pub label: String,
    pub status_word: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Lift,
    Slope,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self { FeatureKind::Lift => "lift", FeatureKind::Slope => "slope" }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lift" => Ok(FeatureKind::Lift),
            "slope" => Ok(FeatureKind::Slope),
            other => Err(format!("unknown feature kind `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassifiedStatusRecord {
    pub full_name: String,
    pub prefix: String,
    pub name: String,
    pub kind: FeatureKind,
    pub is_open: bool,
}

/// Slope grading, in the resort's colour scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Green,
    Blue,
    Red,
    Black,
}

/// Marker colour of an open lift.
pub const OPEN_LIFT_COLOUR: &str = "rgba(243,145,0,1)";
/// Marker colour of anything closed.
pub const CLOSED_COLOUR: &str = "gray";
/// Label colour on an open black slope, where the default text would vanish.
pub const BLACK_SLOPE_TEXT_COLOUR: &str = "white";

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Green => "green",
            DifficultyTier::Blue => "blue",
            DifficultyTier::Red => "red",
            DifficultyTier::Black => "black",
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            DifficultyTier::Green => "rgb(0,150,65)",
            DifficultyTier::Blue => "rgb(0,159,227)",
            DifficultyTier::Red => "rgb(227,6,19)",
            DifficultyTier::Black => "rgb(15,15,15)",
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(DifficultyTier::Green),
            "blue" => Ok(DifficultyTier::Blue),
            "red" => Ok(DifficultyTier::Red),
            "black" => Ok(DifficultyTier::Black),
            other => Err(format!("unknown difficulty `{other}`")),
        }
    }
}

/// Marker position on the side's map image, in percent of width/height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogueFeature {
    pub side: String,
    pub full_name: String,
    pub kind: FeatureKind,
    pub difficulty: Option<DifficultyTier>,
    pub coordinate: Coordinate,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconciledFeature {
    #[serde(flatten)]
    pub feature: CatalogueFeature,
    pub is_open: bool,
}

impl ReconciledFeature {
    /// Colour a map marker for this feature should be drawn in.
    pub fn marker_colour(&self) -> &'static str {
        match (self.is_open, self.feature.kind, self.feature.difficulty) {
            (false, _, _) => CLOSED_COLOUR,
            (true, FeatureKind::Lift, _) => OPEN_LIFT_COLOUR,
            (true, FeatureKind::Slope, Some(tier)) => tier.colour(),
            (true, FeatureKind::Slope, None) => CLOSED_COLOUR,
        }
    }

    /// Text drawn on the marker: the label prefix (`B`, `11`).
    pub fn marker_label(&self) -> &str {
        crate::classify::split_label(&self.feature.full_name).0
    }

    /// Label colour when the default text colour would be unreadable.
    pub fn marker_text_colour(&self) -> Option<&'static str> {
        match (self.is_open, self.feature.kind, self.feature.difficulty) {
            (true, FeatureKind::Slope, Some(DifficultyTier::Black)) => Some(BLACK_SLOPE_TEXT_COLOUR),
            _ => None,
        }
    }
}
