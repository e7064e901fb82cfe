// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned box. `y` grows downward, as in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { left: x, top: y, right: x + width, bottom: y + height }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn union(self, other: Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

/// Scroll/zoom state of the container the anchors are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Container origin in screen coordinates (after scrolling).
    pub origin: Point,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(origin: Point, zoom: f64) -> Self {
        Self { origin, zoom }
    }

    /// Converts a screen rect into container coordinates with the zoom divided out.
    pub fn normalize(&self, rect: Rect) -> Rect {
        let zoom = if self.zoom.is_finite() && self.zoom > 0.0 { self.zoom } else { 1.0 };
        Rect {
            left: (rect.left - self.origin.x) / zoom,
            top: (rect.top - self.origin.y) / zoom,
            right: (rect.right - self.origin.x) / zoom,
            bottom: (rect.bottom - self.origin.y) / zoom,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin: Point::default(), zoom: 1.0 }
    }
}

/// Tuning constants for connector curves. All distances are in container units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    /// Gap between a group's bottom edge and the curve endpoint.
    pub anchor_offset: f64,
    /// Share of the endpoint distance used as curve depth before clamping.
    pub depth_ratio: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Horizontal distance under which a connector counts as near-vertical.
    pub vertical_threshold: f64,
    /// Fixed depth for near-vertical connectors.
    pub vertical_depth: f64,
    pub jitter_period: usize,
    pub jitter_step: f64,
    /// Share of the horizontal span the control points are inset from each end.
    pub control_inset: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            anchor_offset: 5.0,
            depth_ratio: 0.2,
            min_depth: 20.0,
            max_depth: 80.0,
            vertical_threshold: 20.0,
            vertical_depth: 30.0,
            jitter_period: 5,
            jitter_step: 4.0,
            control_inset: 0.2,
        }
    }
}

/// A cubic Bézier connector path, ready for SVG or canvas backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Depth below the lower endpoint, jitter included.
    pub depth: f64,
}

impl CubicPath {
    /// SVG path data: `M x y C x1 y1, x2 y2, x y`, two decimals.
    pub fn to_svg_path(&self) -> String {
        let mut out = String::with_capacity(64);
        let _ = write!(
            out,
            "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y,
        );
        out
    }

    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point {
            x: a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            y: a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        }
    }
}

/// Bounding box of every anchor, normalized against `viewport`. `None` when no anchors.
pub fn group_rect<I>(anchors: I, viewport: &Viewport) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    anchors
        .into_iter()
        .filter(Rect::is_finite)
        .map(|rect| viewport.normalize(rect))
        .reduce(Rect::union)
}

/// Curve depth before jitter.
///
/// Near-vertical connectors get the fixed `vertical_depth`; otherwise the depth is
/// `clamp(distance * depth_ratio, min_depth, max_depth) * curvature`.
pub fn curve_depth(start: Point, end: Point, curvature: f64, config: &GeometryConfig) -> f64 {
    if (end.x - start.x).abs() < config.vertical_threshold {
        return config.vertical_depth;
    }
    let distance = start.distance(end);
    // max/min rather than clamp: a misconfigured min > max must not panic.
    (distance * config.depth_ratio).max(config.min_depth).min(config.max_depth) * curvature
}

/// Fixed-period offset separating parallel connectors in one batch.
pub fn jitter(index: usize, config: &GeometryConfig) -> f64 {
    let period = config.jitter_period.max(1);
    (index % period) as f64 * config.jitter_step
}

/// Computes the connector curve from the bottom of `source` to the bottom of `target`.
///
/// Pure and deterministic: identical inputs produce identical paths.
pub fn compute_path(
    source: Rect,
    target: Rect,
    curvature: f64,
    index: usize,
    config: &GeometryConfig,
) -> CubicPath {
    let start = Point::new(source.center_x(), source.bottom + config.anchor_offset);
    let end = Point::new(target.center_x(), target.bottom + config.anchor_offset);

    let depth = curve_depth(start, end, curvature, config) + jitter(index, config);
    let base_y = start.y.max(end.y) + depth;
    let inset = (end.x - start.x) * config.control_inset;

    CubicPath {
        start,
        control1: Point::new(start.x + inset, base_y),
        control2: Point::new(end.x - inset, base_y),
        end,
        depth,
    }
}
