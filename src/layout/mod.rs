// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connector layout.
//!
//! This module computes the curves drawn between word groups and decides when they need
//! to be recomputed.

pub mod connectors;
pub mod geometry;
pub mod recompute;

pub use connectors::{
    route_connector, route_connectors, AnchorProvider, ConnectorPath, ConnectorPaths,
    RouteContext,
};
pub use geometry::{
    compute_path, curve_depth, group_rect, jitter, CubicPath, GeometryConfig, Point, Rect,
    Viewport,
};
pub use recompute::{run_recompute_loop, Debouncer, LayoutEvent, RecomputeStats, SyncConfig};
