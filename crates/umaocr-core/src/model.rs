use crate::error::UmaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pixel coordinate. Serialized as `[x, y]`, the shape recognizers emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Four corners of a recognized span, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Axis-aligned quad from a left/top origin and a size.
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        Quad([
            Point::new(left, top),
            Point::new(left + width, top),
            Point::new(left + width, top + height),
            Point::new(left, top + height),
        ])
    }

    pub fn top_left(&self) -> Point {
        self.0[0]
    }

    pub fn bottom_right(&self) -> Point {
        self.0[2]
    }

    /// Horizontal start used for left-to-right ordering.
    pub fn left(&self) -> f32 {
        self.0[0].x
    }

    /// Midpoint between the top-left and bottom-left corners.
    pub fn y_center(&self) -> f32 {
        (self.0[0].y + self.0[3].y) / 2.0
    }
}

/// One recognized text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "box")]
    pub bbox: Quad,
    pub text: String,
    pub confidence: f32,
}

/// Fragments judged to share one visual row, ordered left-to-right once
/// they come out of [`crate::layout::order_lines`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Vertical center of the fragment that founded the line.
    pub key: f32,
    pub fragments: Vec<Fragment>,
}

impl Line {
    /// Fragment texts joined with single spaces.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A parsed row of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "no")]
    pub seq: u32,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[serde(alias = "#")]
    No,
    Name,
    #[serde(alias = "value")]
    Points,
}

impl Column {
    /// Header label as shown in the table view.
    pub fn label(&self) -> &'static str {
        match self {
            Column::No => "#",
            Column::Name => "Name",
            Column::Points => "Points",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::No => write!(f, "no"),
            Column::Name => write!(f, "name"),
            Column::Points => write!(f, "points"),
        }
    }
}

impl FromStr for Column {
    type Err = UmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "#" | "no" | "number" => Ok(Column::No),
            "name" => Ok(Column::Name),
            "points" | "value" | "pts" => Ok(Column::Points),
            _ => Err(UmaError::UnknownColumn(s.to_string())),
        }
    }
}
