//! Board zone partitioning.
//!
//! The usable area `[margin, width - margin] x [margin, height - margin]` is
//! split into a 3x3 grid of equal cells. Four edge strips of fixed depth run
//! along the usable area's borders; they overlap the grid cells and are
//! overlays, not partitions. The y axis points up: `Top*` zones have the
//! largest y values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Depth of the edge strip zones in millimeters.
pub const EDGE_STRIP_DEPTH_MM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardZone {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    LeftEdge,
    RightEdge,
    TopEdge,
    BottomEdge,
}

impl BoardZone {
    /// The nine cells of the 3x3 grid.
    pub const GRID: [BoardZone; 9] = [
        BoardZone::TopLeft,
        BoardZone::TopCenter,
        BoardZone::TopRight,
        BoardZone::CenterLeft,
        BoardZone::Center,
        BoardZone::CenterRight,
        BoardZone::BottomLeft,
        BoardZone::BottomCenter,
        BoardZone::BottomRight,
    ];

    pub const EDGES: [BoardZone; 4] = [
        BoardZone::LeftEdge,
        BoardZone::RightEdge,
        BoardZone::TopEdge,
        BoardZone::BottomEdge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardZone::TopLeft => "top_left",
            BoardZone::TopCenter => "top_center",
            BoardZone::TopRight => "top_right",
            BoardZone::CenterLeft => "center_left",
            BoardZone::Center => "center",
            BoardZone::CenterRight => "center_right",
            BoardZone::BottomLeft => "bottom_left",
            BoardZone::BottomCenter => "bottom_center",
            BoardZone::BottomRight => "bottom_right",
            BoardZone::LeftEdge => "left_edge",
            BoardZone::RightEdge => "right_edge",
            BoardZone::TopEdge => "top_edge",
            BoardZone::BottomEdge => "bottom_edge",
        }
    }
}

impl std::fmt::Display for BoardZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownZone(pub String);

impl std::fmt::Display for UnknownZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown board zone '{}'", self.0)
    }
}

impl std::error::Error for UnknownZone {}

impl FromStr for BoardZone {
    type Err = UnknownZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        BoardZone::GRID
            .iter()
            .chain(BoardZone::EDGES.iter())
            .find(|zone| zone.as_str() == normalized)
            .copied()
            .ok_or_else(|| UnknownZone(s.to_string()))
    }
}

/// Board outline used for zone computation, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl BoardGeometry {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// The full usable area inside the margin.
    pub fn usable_area(&self) -> ZoneBounds {
        ZoneBounds {
            x_min: self.margin,
            y_min: self.margin,
            x_max: self.width - self.margin,
            y_max: self.height - self.margin,
        }
    }

    pub fn zone_bounds(&self, zone: BoardZone) -> ZoneBounds {
        zone_bounds(zone, self.width, self.height, self.margin)
    }
}

/// Axis-aligned rectangle `(x_min, y_min) - (x_max, y_max)` in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl ZoneBounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }

    /// True when the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &ZoneBounds) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

/// Bounding box of `zone` on a `board_width` x `board_height` board.
/// Recomputed on every call.
pub fn zone_bounds(zone: BoardZone, board_width: f64, board_height: f64, margin: f64) -> ZoneBounds {
    let w = board_width;
    let h = board_height;
    let m = margin;

    let third_w = (w - 2.0 * m) / 3.0;
    let third_h = (h - 2.0 * m) / 3.0;

    let (x_min, y_min, x_max, y_max) = match zone {
        BoardZone::TopLeft => (m, h - m - third_h, m + third_w, h - m),
        BoardZone::TopCenter => (m + third_w, h - m - third_h, m + 2.0 * third_w, h - m),
        BoardZone::TopRight => (m + 2.0 * third_w, h - m - third_h, w - m, h - m),
        BoardZone::CenterLeft => (m, m + third_h, m + third_w, h - m - third_h),
        BoardZone::Center => (m + third_w, m + third_h, m + 2.0 * third_w, h - m - third_h),
        BoardZone::CenterRight => (m + 2.0 * third_w, m + third_h, w - m, h - m - third_h),
        BoardZone::BottomLeft => (m, m, m + third_w, m + third_h),
        BoardZone::BottomCenter => (m + third_w, m, m + 2.0 * third_w, m + third_h),
        BoardZone::BottomRight => (m + 2.0 * third_w, m, w - m, m + third_h),
        BoardZone::LeftEdge => (m, m, m + EDGE_STRIP_DEPTH_MM, h - m),
        BoardZone::RightEdge => (w - m - EDGE_STRIP_DEPTH_MM, m, w - m, h - m),
        BoardZone::TopEdge => (m, h - m - EDGE_STRIP_DEPTH_MM, w - m, h - m),
        BoardZone::BottomEdge => (m, m, w - m, m + EDGE_STRIP_DEPTH_MM),
    };

    ZoneBounds {
        x_min,
        y_min,
        x_max,
        y_max,
    }
}

/// Zone lookup by name. Unrecognized names get the full usable area.
pub fn zone_bounds_by_name(name: &str, board_width: f64, board_height: f64, margin: f64) -> ZoneBounds {
    match name.parse::<BoardZone>() {
        Ok(zone) => zone_bounds(zone, board_width, board_height, margin),
        Err(_) => BoardGeometry::new(board_width, board_height, margin).usable_area(),
    }
}
