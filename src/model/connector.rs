// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::address::WordAddress;
use super::group::Color;

pub const MIN_CURVATURE: f64 = 0.0;
pub const MAX_CURVATURE: f64 = 2.0;
pub const DEFAULT_CURVATURE: f64 = 1.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_CONNECTOR_COLOR: &str = "#374151";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }

    /// SVG `stroke-dasharray` value for this style, scaled by stroke width.
    pub fn dash_array(self, stroke_width: f64) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some(format!("{} {}", stroke_width * 4.0, stroke_width * 3.0)),
            Self::Dotted => Some(format!("{} {}", stroke_width, stroke_width * 2.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeadShape {
    #[default]
    Arrow,
    Dot,
    Diamond,
    None,
}

impl HeadShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Dot => "dot",
            Self::Diamond => "diamond",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HeadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseStyleError {
    kind: &'static str,
    value: String,
}

impl FromStr for StrokeStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            other => Err(ParseStyleError { kind: "stroke style", value: other.to_owned() }),
        }
    }
}

impl FromStr for HeadShape {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Arrow),
            "dot" => Ok(Self::Dot),
            "diamond" => Ok(Self::Diamond),
            "none" => Ok(Self::None),
            other => Err(ParseStyleError { kind: "head shape", value: other.to_owned() }),
        }
    }
}

/// A many-to-many annotation arrow between the groups covering `sources` and the
/// groups covering `targets`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    sources: BTreeSet<WordAddress>,
    targets: BTreeSet<WordAddress>,
    style: StrokeStyle,
    head: HeadShape,
    stroke_width: f64,
    color: Color,
    curvature: f64,
}

impl Connector {
    pub fn new(sources: BTreeSet<WordAddress>, targets: BTreeSet<WordAddress>) -> Self {
        Self {
            sources,
            targets,
            style: StrokeStyle::default(),
            head: HeadShape::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: Color::new_static(DEFAULT_CONNECTOR_COLOR),
            curvature: DEFAULT_CURVATURE,
        }
    }

    pub fn sources(&self) -> &BTreeSet<WordAddress> {
        &self.sources
    }

    pub fn targets(&self) -> &BTreeSet<WordAddress> {
        &self.targets
    }

    /// True when either endpoint set mentions any of `addresses`.
    pub fn references_any(&self, addresses: &BTreeSet<WordAddress>) -> bool {
        addresses.iter().any(|a| self.sources.contains(a) || self.targets.contains(a))
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn head(&self) -> HeadShape {
        self.head
    }

    pub fn set_head(&mut self, head: HeadShape) {
        self.head = head;
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Non-finite or non-positive widths fall back to the default.
    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        self.stroke_width = if stroke_width.is_finite() && stroke_width > 0.0 {
            stroke_width
        } else {
            DEFAULT_STROKE_WIDTH
        };
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Clamped to `[0, 2]`; NaN resets to the default.
    pub fn set_curvature(&mut self, curvature: f64) {
        self.curvature = clamp_curvature(curvature);
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn with_head(mut self, head: HeadShape) -> Self {
        self.set_head(head);
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.set_curvature(curvature);
        self
    }
}

pub fn clamp_curvature(curvature: f64) -> f64 {
    if curvature.is_nan() {
        return DEFAULT_CURVATURE;
    }
    curvature.clamp(MIN_CURVATURE, MAX_CURVATURE)
}
