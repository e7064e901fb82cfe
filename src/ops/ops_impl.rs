// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Per-op mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(
    document: &mut Document,
    op: &Op,
    class: &WordClass,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        Op::AddPage { page_id, index } => {
            if document.page(page_id).is_some() {
                return Err(ApplyError::already_exists(ObjectKind::Page, page_id));
            }
            let pages = document.pages_mut();
            let at = index.unwrap_or(pages.len()).min(pages.len());
            pages.insert(at, Page::new(page_id.clone()));
            delta.record_added(ObjectKey::new(ObjectKind::Page, page_id));
            Ok(())
        }
        Op::RemovePage { page_id } => {
            let Some(position) = document.pages().iter().position(|p| p.page_id() == page_id)
            else {
                return Err(ApplyError::not_found(ObjectKind::Page, page_id));
            };
            let page = document.pages_mut().remove(position);
            for line in page.lines() {
                remove_line_references(document, line.line_id(), delta);
                delta.record_removed(ObjectKey::new(ObjectKind::Line, line.line_id()));
            }
            delta.record_removed(ObjectKey::new(ObjectKind::Page, page_id));
            Ok(())
        }
        Op::AddLine { page_id, line_id, french, english, index } => {
            if document.line(line_id).is_some() {
                return Err(ApplyError::already_exists(ObjectKind::Line, line_id));
            }
            let Some(page) = document.page_mut(page_id) else {
                return Err(ApplyError::not_found(ObjectKind::Page, page_id));
            };
            let lines = page.lines_mut();
            let at = index.unwrap_or(lines.len()).min(lines.len());
            lines.insert(at, Line::new(line_id.clone(), french.clone(), english.clone()));
            delta.record_added(ObjectKey::new(ObjectKind::Line, line_id));
            delta.record_updated(ObjectKey::new(ObjectKind::Page, page_id));
            Ok(())
        }
        Op::SetLineText { line_id, language, text } => {
            let Some(line) = document.line_mut(line_id) else {
                return Err(ApplyError::not_found(ObjectKind::Line, line_id));
            };
            if line.text(*language) == text {
                trace!(%line_id, %language, "line text unchanged");
                return Ok(());
            }
            let before = word_count(line.text(*language), class);
            line.set_text(*language, text.clone());
            let after = word_count(text, class);
            if before != after {
                // Addresses are positional; references past the edit now name other words.
                debug!(%line_id, %language, before, after, "line word count changed");
            }
            delta.record_updated(ObjectKey::new(ObjectKind::Line, line_id));
            Ok(())
        }
        Op::RemoveLine { line_id } => {
            let Some(page) = document
                .pages_mut()
                .iter_mut()
                .find(|page| page.lines().iter().any(|line| line.line_id() == line_id))
            else {
                return Err(ApplyError::not_found(ObjectKind::Line, line_id));
            };
            let page_id = page.page_id().clone();
            page.lines_mut().retain(|line| line.line_id() != line_id);
            remove_line_references(document, line_id, delta);
            delta.record_removed(ObjectKey::new(ObjectKind::Line, line_id));
            delta.record_updated(ObjectKey::new(ObjectKind::Page, &page_id));
            Ok(())
        }
        Op::AddGroup { group_id, addresses, role, color, label } => {
            if document.groups().contains_key(group_id) {
                return Err(ApplyError::already_exists(ObjectKind::Group, group_id));
            }
            let addresses = existing_addresses(document, addresses, class);
            if addresses.is_empty() {
                trace!(%group_id, "group references no existing words; skipping");
                return Ok(());
            }
            let color = color.clone().unwrap_or_else(|| Color::new_static(role.default_color()));
            let group = WordGroup::new(addresses, *role, color, label.clone()).map_err(
                |source| ApplyError::InvalidGroup { group_id: group_id.clone(), source },
            )?;
            document.groups_mut().insert(group_id.clone(), group);
            delta.record_added(ObjectKey::new(ObjectKind::Group, group_id));
            Ok(())
        }
        Op::UpdateGroup { group_id, patch } => {
            let Some(group) = document.groups_mut().get_mut(group_id) else {
                return Err(ApplyError::not_found(ObjectKind::Group, group_id));
            };
            let before = group.clone();
            if let Some(role) = patch.role {
                group.set_role(role);
            }
            if let Some(color) = &patch.color {
                group.set_color(color.clone());
            }
            if let Some(label) = &patch.label {
                group.set_label(label.as_deref());
            }
            if *group != before {
                delta.record_updated(ObjectKey::new(ObjectKind::Group, group_id));
            }
            Ok(())
        }
        Op::RemoveGroup { group_id } => {
            if remove_group_cascading(document, group_id, delta).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Group, group_id));
            }
            Ok(())
        }
        Op::AddConnector { connector_id, connector } => {
            if document.connectors().contains_key(connector_id) {
                return Err(ApplyError::already_exists(ObjectKind::Connector, connector_id));
            }
            let sources = existing_addresses(document, connector.sources(), class);
            let targets = existing_addresses(document, connector.targets(), class);
            if sources.is_empty() || targets.is_empty() {
                trace!(%connector_id, "connector endpoint references no existing words; skipping");
                return Ok(());
            }
            let mut stored = Connector::new(sources, targets);
            stored.set_style(connector.style());
            stored.set_head(connector.head());
            stored.set_stroke_width(connector.stroke_width());
            stored.set_color(connector.color());
            stored.set_curvature(connector.curvature());
            document.connectors_mut().insert(connector_id.clone(), stored);
            delta.record_added(ObjectKey::new(ObjectKind::Connector, connector_id));
            Ok(())
        }
        Op::UpdateConnector { connector_id, patch } => {
            let sources = patch
                .sources
                .as_ref()
                .map(|sources| existing_addresses(document, sources, class))
                .filter(|sources| !sources.is_empty());
            let targets = patch
                .targets
                .as_ref()
                .map(|targets| existing_addresses(document, targets, class))
                .filter(|targets| !targets.is_empty());
            let Some(existing) = document.connectors_mut().get_mut(connector_id) else {
                return Err(ApplyError::not_found(ObjectKind::Connector, connector_id));
            };

            let mut updated = Connector::new(
                sources.unwrap_or_else(|| existing.sources().clone()),
                targets.unwrap_or_else(|| existing.targets().clone()),
            );
            updated.set_style(patch.style.unwrap_or(existing.style()));
            updated.set_head(patch.head.unwrap_or(existing.head()));
            updated.set_stroke_width(patch.stroke_width.unwrap_or(existing.stroke_width()));
            updated.set_color(patch.color.clone().unwrap_or_else(|| existing.color().into()));
            updated.set_curvature(patch.curvature.unwrap_or(existing.curvature()));
            if *existing == updated {
                return Ok(());
            }
            *existing = updated;
            delta.record_updated(ObjectKey::new(ObjectKind::Connector, connector_id));
            Ok(())
        }
        Op::RemoveConnector { connector_id } => {
            if document.connectors_mut().remove(connector_id).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Connector, connector_id));
            }
            delta.record_removed(ObjectKey::new(ObjectKind::Connector, connector_id));
            Ok(())
        }
        Op::AddNote { note_id, line_id, text } => {
            if document.notes().contains_key(note_id) {
                return Err(ApplyError::already_exists(ObjectKind::Note, note_id));
            }
            if document.line(line_id).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Line, line_id));
            }
            document
                .notes_mut()
                .insert(note_id.clone(), SidebarNote::new(line_id.clone(), text.clone()));
            delta.record_added(ObjectKey::new(ObjectKind::Note, note_id));
            Ok(())
        }
        Op::SetNoteText { note_id, text } => {
            let Some(note) = document.notes_mut().get_mut(note_id) else {
                return Err(ApplyError::not_found(ObjectKind::Note, note_id));
            };
            if note.text() == text {
                return Ok(());
            }
            note.set_text(text.clone());
            delta.record_updated(ObjectKey::new(ObjectKind::Note, note_id));
            Ok(())
        }
        Op::RemoveNote { note_id } => {
            if document.notes_mut().remove(note_id).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Note, note_id));
            }
            delta.record_removed(ObjectKey::new(ObjectKind::Note, note_id));
            Ok(())
        }
        Op::AddHighlight { highlight_id, addresses, color } => {
            if document.highlights().contains_key(highlight_id) {
                return Err(ApplyError::already_exists(ObjectKind::Highlight, highlight_id));
            }
            let addresses = existing_addresses(document, addresses, class);
            if addresses.is_empty() {
                trace!(%highlight_id, "highlight references no existing words; skipping");
                return Ok(());
            }
            document
                .highlights_mut()
                .insert(highlight_id.clone(), Highlight::new(addresses, color.clone()));
            delta.record_added(ObjectKey::new(ObjectKind::Highlight, highlight_id));
            Ok(())
        }
        Op::RemoveHighlight { highlight_id } => {
            if document.highlights_mut().remove(highlight_id).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Highlight, highlight_id));
            }
            delta.record_removed(ObjectKey::new(ObjectKind::Highlight, highlight_id));
            Ok(())
        }
        Op::AddLink { link_id, french, english } => {
            if document.links().contains_key(link_id) {
                return Err(ApplyError::already_exists(ObjectKind::Link, link_id));
            }
            for (expected, side) in [(Language::French, french), (Language::English, english)] {
                if let Some(address) = side.iter().find(|a| a.language() != expected) {
                    return Err(ApplyError::LanguageMismatch {
                        link_id: link_id.clone(),
                        expected,
                        address: address.clone(),
                    });
                }
            }
            let french = existing_addresses(document, french, class);
            let english = existing_addresses(document, english, class);
            if french.is_empty() || english.is_empty() {
                trace!(%link_id, "link side references no existing words; skipping");
                return Ok(());
            }
            document.links_mut().insert(link_id.clone(), LinkedPair::new(french, english));
            delta.record_added(ObjectKey::new(ObjectKind::Link, link_id));
            Ok(())
        }
        Op::RemoveLink { link_id } => {
            if document.links_mut().remove(link_id).is_none() {
                return Err(ApplyError::not_found(ObjectKind::Link, link_id));
            }
            delta.record_removed(ObjectKey::new(ObjectKind::Link, link_id));
            Ok(())
        }
    }
}

fn existing_addresses(
    document: &Document,
    addresses: &BTreeSet<WordAddress>,
    class: &WordClass,
) -> BTreeSet<WordAddress> {
    // Count words once per (line, language) run instead of once per address.
    let mut counts = BTreeMap::<(&LineId, Language), usize>::new();
    addresses
        .iter()
        .filter(|&address| {
            let count = *counts.entry((address.line_id(), address.language())).or_insert_with(|| {
                document
                    .line(address.line_id())
                    .map(|line| word_count(line.text(address.language()), class))
                    .unwrap_or(0)
            });
            address.word_index() < count
        })
        .cloned()
        .collect()
}

/// Removes a group and every connector whose sources or targets mention its words.
fn remove_group_cascading(
    document: &mut Document,
    group_id: &GroupId,
    delta: &mut DeltaBuilder,
) -> Option<WordGroup> {
    let group = document.groups_mut().remove(group_id)?;
    let dangling = document
        .connectors()
        .iter()
        .filter(|(_, connector)| connector.references_any(group.addresses()))
        .map(|(connector_id, _)| connector_id.clone())
        .collect::<Vec<_>>();
    for connector_id in dangling {
        document.connectors_mut().remove(&connector_id);
        delta.record_removed(ObjectKey::new(ObjectKind::Connector, &connector_id));
    }
    delta.record_removed(ObjectKey::new(ObjectKind::Group, group_id));
    Some(group)
}

/// Drops everything that points at words on a removed line.
fn remove_line_references(document: &mut Document, line_id: &LineId, delta: &mut DeltaBuilder) {
    let on_line = |address: &WordAddress| address.line_id() == line_id;

    let group_ids = document
        .groups()
        .iter()
        .filter(|(_, group)| group.addresses().iter().any(on_line))
        .map(|(group_id, _)| group_id.clone())
        .collect::<Vec<_>>();
    for group_id in group_ids {
        remove_group_cascading(document, &group_id, delta);
    }

    let connector_ids = document
        .connectors()
        .iter()
        .filter(|(_, c)| c.sources().iter().chain(c.targets().iter()).any(on_line))
        .map(|(connector_id, _)| connector_id.clone())
        .collect::<Vec<_>>();
    for connector_id in connector_ids {
        document.connectors_mut().remove(&connector_id);
        delta.record_removed(ObjectKey::new(ObjectKind::Connector, &connector_id));
    }

    let mut emptied = Vec::new();
    for (highlight_id, highlight) in document.highlights_mut().iter_mut() {
        if !highlight.addresses().iter().any(on_line) {
            continue;
        }
        let kept = highlight
            .addresses()
            .iter()
            .filter(|a| !on_line(*a))
            .cloned()
            .collect::<BTreeSet<_>>();
        if kept.is_empty() {
            emptied.push(highlight_id.clone());
        } else {
            let color = Color::from(highlight.color());
            *highlight = Highlight::new(kept, color);
            delta.record_updated(ObjectKey::new(ObjectKind::Highlight, highlight_id));
        }
    }
    for highlight_id in emptied {
        document.highlights_mut().remove(&highlight_id);
        delta.record_removed(ObjectKey::new(ObjectKind::Highlight, &highlight_id));
    }

    let link_ids = document
        .links()
        .iter()
        .filter(|(_, link)| link.addresses().any(on_line))
        .map(|(link_id, _)| link_id.clone())
        .collect::<Vec<_>>();
    for link_id in link_ids {
        document.links_mut().remove(&link_id);
        delta.record_removed(ObjectKey::new(ObjectKind::Link, &link_id));
    }

    let note_ids = document
        .notes()
        .iter()
        .filter(|(_, note)| note.line_id() == line_id)
        .map(|(note_id, _)| note_id.clone())
        .collect::<Vec<_>>();
    for note_id in note_ids {
        document.notes_mut().remove(&note_id);
        delta.record_removed(ObjectKey::new(ObjectKind::Note, &note_id));
    }
}
