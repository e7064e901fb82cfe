// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connector routing: resolve connector endpoints to word groups, measure the groups via
//! an [`AnchorProvider`], and fan out one curve per (source group, target group) pair.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use smallvec::SmallVec;
use tracing::trace;

use super::geometry::{compute_path, group_rect, CubicPath, GeometryConfig, Rect, Viewport};
use crate::model::{Connector, ConnectorId, Document, GroupId, WordAddress, WordGroup};

/// Screen rectangles for rendered words.
///
/// Implemented by whatever owns the rendered text. A word that is not currently laid out
/// (scrolled away, not yet measured) returns `None` and is skipped.
pub trait AnchorProvider {
    fn anchor(&self, address: &WordAddress) -> Option<Rect>;
}

impl AnchorProvider for BTreeMap<WordAddress, Rect> {
    fn anchor(&self, address: &WordAddress) -> Option<Rect> {
        self.get(address).copied()
    }
}

impl AnchorProvider for HashMap<WordAddress, Rect> {
    fn anchor(&self, address: &WordAddress) -> Option<Rect> {
        self.get(address).copied()
    }
}

/// One routed curve between a source group and a target group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    pub connector_id: ConnectorId,
    pub source_group: GroupId,
    pub target_group: GroupId,
    pub path: CubicPath,
}

pub type ConnectorPaths = SmallVec<[ConnectorPath; 4]>;

/// Everything routing needs besides the document.
#[derive(Clone, Copy)]
pub struct RouteContext<'a> {
    pub anchors: &'a dyn AnchorProvider,
    pub viewport: &'a Viewport,
    pub config: &'a GeometryConfig,
}

/// Routes a single connector, numbering its paths from `*next_index` onwards.
///
/// `next_index` is advanced past every emitted path so consecutive calls share one
/// jitter sequence.
pub fn route_connector(
    document: &Document,
    connector_id: &ConnectorId,
    connector: &Connector,
    cx: RouteContext<'_>,
    next_index: &mut usize,
) -> ConnectorPaths {
    let sources = measured_groups(document, connector.sources(), cx);
    let targets = measured_groups(document, connector.targets(), cx);

    let mut paths = ConnectorPaths::new();
    if sources.is_empty() || targets.is_empty() {
        trace!(connector = %connector_id, "connector has an unmeasured side; skipped");
        return paths;
    }

    for (source_group, source_rect) in &sources {
        for (target_group, target_rect) in &targets {
            let path = compute_path(
                *source_rect,
                *target_rect,
                connector.curvature(),
                *next_index,
                cx.config,
            );
            *next_index += 1;
            paths.push(ConnectorPath {
                connector_id: connector_id.clone(),
                source_group: (*source_group).clone(),
                target_group: (*target_group).clone(),
                path,
            });
        }
    }
    paths
}

/// Routes every connector in the document in id order with one running jitter index.
pub fn route_connectors(document: &Document, cx: RouteContext<'_>) -> Vec<ConnectorPath> {
    let mut next_index = 0;
    let mut out = Vec::new();
    for (connector_id, connector) in document.connectors() {
        out.extend(route_connector(document, connector_id, connector, cx, &mut next_index));
    }
    trace!(connectors = document.connectors().len(), paths = out.len(), "routed connectors");
    out
}

/// Groups touched by `addresses` that have at least one measured word, with their
/// normalized bounding boxes.
fn measured_groups<'a>(
    document: &'a Document,
    addresses: &'a BTreeSet<WordAddress>,
    cx: RouteContext<'_>,
) -> SmallVec<[(&'a GroupId, Rect); 2]> {
    document
        .groups_covering(addresses)
        .filter_map(|(group_id, group)| measure_group(group, cx).map(|rect| (group_id, rect)))
        .collect()
}

fn measure_group(group: &WordGroup, cx: RouteContext<'_>) -> Option<Rect> {
    let anchors = group.addresses().iter().filter_map(|address| cx.anchors.anchor(address));
    group_rect(anchors, cx.viewport)
}
