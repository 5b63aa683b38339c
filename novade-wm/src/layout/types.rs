use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WindowManagementError;

/// Arrangement policy applied by the [`LayoutEngine`](super::LayoutEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutType {
    /// Windows keep whatever geometry they were given.
    #[default]
    Free,
    /// Row-major grid, edge to edge.
    Tiling,
    /// Every window gets the full area; stacking order decides what is seen.
    Stacking,
    /// Geometrically identical to `Stacking`; tab groups decide what is seen.
    Tabbed,
    /// Like `Free`.
    Floating,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Free => "free",
            LayoutType::Tiling => "tiling",
            LayoutType::Stacking => "stacking",
            LayoutType::Tabbed => "tabbed",
            LayoutType::Floating => "floating",
        }
    }

    /// Whether this layout ever changes window geometry.
    pub fn arranges_windows(&self) -> bool {
        !matches!(self, LayoutType::Free | LayoutType::Floating)
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = WindowManagementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(LayoutType::Free),
            "tiling" => Ok(LayoutType::Tiling),
            "stacking" => Ok(LayoutType::Stacking),
            "tabbed" => Ok(LayoutType::Tabbed),
            "floating" => Ok(LayoutType::Floating),
            _ => Err(WindowManagementError::UnknownLayout(s.to_string())),
        }
    }
}
