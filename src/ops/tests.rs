// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use rstest::{fixture, rstest};

use crate::model::fixtures::{en, fr, group_id, le_chat_dort, line_id, set};
use crate::model::{
    Connector, ConnectorId, Document, GrammaticalRole, GroupError, HighlightId, Language, LinkId,
    NoteId, PageId, WordAddress, WordClass,
};

use super::{apply_ops, ApplyError, ConnectorPatch, GroupPatch, ObjectKey, ObjectKind, Op};

#[fixture]
fn document() -> Document {
    le_chat_dort()
}

fn key(kind: ObjectKind, id: &str) -> ObjectKey {
    ObjectKey { kind, id: id.to_owned() }
}

fn add_group(id: &str, addresses: BTreeSet<WordAddress>, role: GrammaticalRole) -> Op {
    Op::AddGroup { group_id: group_id(id), addresses, role, color: None, label: None }
}

fn connector_id(id: &str) -> ConnectorId {
    ConnectorId::new(id).expect("connector id")
}

#[rstest]
fn le_chat_dort_scenario_cascades_connector_on_group_delete(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[
            add_group("g:article", set([fr("l1", 0)]), GrammaticalRole::Article),
            add_group("g:subject", set([fr("l1", 1)]), GrammaticalRole::Subject),
            Op::AddConnector {
                connector_id: connector_id("c:1"),
                connector: Connector::new(set([fr("l1", 0)]), set([fr("l1", 1)])),
            },
        ],
        &class,
    )
    .expect("setup");
    assert_eq!(document.groups().len(), 2);
    assert_eq!(document.connectors().len(), 1);

    let result =
        apply_ops(&mut document, &[Op::RemoveGroup { group_id: group_id("g:subject") }], &class)
            .expect("remove group");

    assert!(document.connectors().is_empty());
    assert_eq!(document.groups().len(), 1);
    assert!(document.groups().contains_key(&group_id("g:article")));
    assert_eq!(
        result.delta.removed,
        vec![key(ObjectKind::Group, "g:subject"), key(ObjectKind::Connector, "c:1")]
    );
}

#[rstest]
fn removing_unreferenced_group_keeps_connectors(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[
            add_group("g:le", set([fr("l1", 0)]), GrammaticalRole::Article),
            add_group("g:chat", set([fr("l1", 1)]), GrammaticalRole::Noun),
            add_group("g:dort", set([fr("l1", 2)]), GrammaticalRole::Verb),
            Op::AddConnector {
                connector_id: connector_id("c:1"),
                connector: Connector::new(set([fr("l1", 0)]), set([fr("l1", 1)])),
            },
        ],
        &class,
    )
    .expect("setup");
    let connectors_before = document.connectors().clone();

    apply_ops(&mut document, &[Op::RemoveGroup { group_id: group_id("g:dort") }], &class)
        .expect("remove");

    assert_eq!(document.connectors(), &connectors_before);
    assert_eq!(document.groups().len(), 2);
}

#[rstest]
fn group_on_missing_words_is_a_no_op(mut document: Document) {
    let class = WordClass::default();
    let result = apply_ops(
        &mut document,
        &[add_group("g:ghost", set([fr("l1", 9)]), GrammaticalRole::Noun)],
        &class,
    )
    .expect("apply");
    assert!(result.delta.is_empty());
    assert!(document.groups().is_empty());
}

#[rstest]
fn group_drops_missing_trailing_words(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[add_group("g:tail", set([fr("l1", 2), fr("l1", 3)]), GrammaticalRole::Verb)],
        &class,
    )
    .expect("apply");
    let group = document.groups().get(&group_id("g:tail")).expect("group");
    assert_eq!(group.addresses(), &set([fr("l1", 2)]));
}

#[rstest]
fn non_contiguous_group_is_rejected_atomically(mut document: Document) {
    let class = WordClass::default();
    let before = document.clone();
    let err = apply_ops(
        &mut document,
        &[
            add_group("g:ok", set([fr("l1", 0)]), GrammaticalRole::Article),
            add_group("g:gap", set([fr("l1", 0), fr("l1", 2)]), GrammaticalRole::Noun),
        ],
        &class,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ApplyError::InvalidGroup {
            group_id: group_id("g:gap"),
            source: GroupError::NotContiguous { after: 0 },
        }
    );
    assert_eq!(document, before);
}

#[rstest]
fn duplicate_ids_are_rejected(mut document: Document) {
    let class = WordClass::default();
    let op = add_group("g:1", set([fr("l1", 0)]), GrammaticalRole::Article);
    apply_ops(&mut document, &[op.clone()], &class).expect("first");
    let err = apply_ops(&mut document, &[op], &class).unwrap_err();
    assert_eq!(err, ApplyError::AlreadyExists { kind: ObjectKind::Group, id: "g:1".to_owned() });
}

#[rstest]
fn update_group_patches_fields(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[Op::AddGroup {
            group_id: group_id("g:1"),
            addresses: set([fr("l1", 1)]),
            role: GrammaticalRole::Noun,
            color: None,
            label: Some("sujet".to_owned()),
        }],
        &class,
    )
    .expect("setup");

    let result = apply_ops(
        &mut document,
        &[Op::UpdateGroup {
            group_id: group_id("g:1"),
            patch: GroupPatch {
                role: Some(GrammaticalRole::Subject),
                color: Some("#000000".into()),
                label: Some(None),
            },
        }],
        &class,
    )
    .expect("update");

    let group = document.groups().get(&group_id("g:1")).expect("group");
    assert_eq!(group.role(), GrammaticalRole::Subject);
    assert_eq!(group.color(), "#000000");
    assert_eq!(group.label(), None);
    assert_eq!(result.delta.updated, vec![key(ObjectKind::Group, "g:1")]);
}

#[rstest]
fn unchanged_values_record_no_update(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[
            add_group("g:1", set([fr("l1", 1)]), GrammaticalRole::Noun),
            Op::AddConnector {
                connector_id: connector_id("c:1"),
                connector: Connector::new(set([fr("l1", 1)]), set([fr("l1", 2)])),
            },
            Op::AddNote {
                note_id: NoteId::new("n:1").expect("note id"),
                line_id: line_id("l1"),
                text: "présent".to_owned(),
            },
        ],
        &class,
    )
    .expect("setup");
    let before = document.clone();

    let result = apply_ops(
        &mut document,
        &[
            Op::UpdateGroup { group_id: group_id("g:1"), patch: GroupPatch::default() },
            Op::UpdateGroup {
                group_id: group_id("g:1"),
                patch: GroupPatch {
                    role: Some(GrammaticalRole::Noun),
                    ..GroupPatch::default()
                },
            },
            Op::SetLineText {
                line_id: line_id("l1"),
                language: Language::French,
                text: "Le chat dort.".to_owned(),
            },
            Op::UpdateConnector {
                connector_id: connector_id("c:1"),
                patch: ConnectorPatch::default(),
            },
            Op::SetNoteText {
                note_id: NoteId::new("n:1").expect("note id"),
                text: "présent".to_owned(),
            },
        ],
        &class,
    )
    .expect("no-op updates");

    assert!(result.delta.is_empty(), "{:?}", result.delta);
    assert_eq!(document, before);
}

#[rstest]
fn update_connector_clamps_curvature_and_keeps_endpoints(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[Op::AddConnector {
            connector_id: connector_id("c:1"),
            connector: Connector::new(set([fr("l1", 0)]), set([en("l1", 0)])),
        }],
        &class,
    )
    .expect("setup");

    apply_ops(
        &mut document,
        &[Op::UpdateConnector {
            connector_id: connector_id("c:1"),
            patch: ConnectorPatch {
                curvature: Some(5.0),
                targets: Some(set([en("l1", 42)])),
                ..ConnectorPatch::default()
            },
        }],
        &class,
    )
    .expect("update");

    let connector = document.connectors().get(&connector_id("c:1")).expect("connector");
    assert_eq!(connector.curvature(), 2.0);
    assert_eq!(connector.targets(), &set([en("l1", 0)]));
}

#[rstest]
fn set_line_text_keeps_positional_addresses(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[add_group("g:dort", set([fr("l1", 2)]), GrammaticalRole::Verb)],
        &class,
    )
    .expect("setup");

    apply_ops(
        &mut document,
        &[Op::SetLineText {
            line_id: line_id("l1"),
            language: Language::French,
            text: "Le gros chat dort.".to_owned(),
        }],
        &class,
    )
    .expect("edit");

    // The group still points at index 2, which is now "chat".
    let group = document.groups().get(&group_id("g:dort")).expect("group");
    assert_eq!(group.addresses(), &set([fr("l1", 2)]));
}

#[rstest]
fn remove_line_cascades_to_attached_objects(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[
            add_group("g:chat", set([fr("l1", 1)]), GrammaticalRole::Subject),
            add_group("g:il", set([fr("l2", 0)]), GrammaticalRole::Pronoun),
            Op::AddConnector {
                connector_id: connector_id("c:cross"),
                connector: Connector::new(set([fr("l2", 0)]), set([fr("l1", 1)])),
            },
            Op::AddHighlight {
                highlight_id: HighlightId::new("h:1").expect("highlight id"),
                addresses: set([fr("l1", 0), fr("l2", 1)]),
                color: "#ffff00".into(),
            },
            Op::AddLink {
                link_id: LinkId::new("k:1").expect("link id"),
                french: set([fr("l1", 1)]),
                english: set([en("l1", 1)]),
            },
            Op::AddNote {
                note_id: NoteId::new("n:1").expect("note id"),
                line_id: line_id("l1"),
                text: "dormir: to sleep".to_owned(),
            },
        ],
        &class,
    )
    .expect("setup");

    let result = apply_ops(&mut document, &[Op::RemoveLine { line_id: line_id("l1") }], &class)
        .expect("remove line");

    assert!(document.line(&line_id("l1")).is_none());
    assert_eq!(document.groups().keys().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["g:il"]);
    assert!(document.connectors().is_empty());
    assert!(document.links().is_empty());
    assert!(document.notes().is_empty());
    let highlight =
        document.highlights().get(&HighlightId::new("h:1").expect("highlight id")).expect("kept");
    assert_eq!(highlight.addresses(), &set([fr("l2", 1)]));

    assert!(result.delta.removed.contains(&key(ObjectKind::Line, "l1")));
    assert!(result.delta.removed.contains(&key(ObjectKind::Connector, "c:cross")));
    assert!(result.delta.updated.contains(&key(ObjectKind::Highlight, "h:1")));
    assert!(result.delta.updated.contains(&key(ObjectKind::Page, "p1")));
}

#[rstest]
fn remove_page_removes_its_lines(mut document: Document) {
    let class = WordClass::default();
    apply_ops(
        &mut document,
        &[
            Op::AddPage { page_id: PageId::new("p0").expect("page id"), index: Some(0) },
            Op::AddLine {
                page_id: PageId::new("p0").expect("page id"),
                line_id: line_id("l0"),
                french: "Bonjour.".to_owned(),
                english: "Hello.".to_owned(),
                index: None,
            },
        ],
        &class,
    )
    .expect("setup");
    assert_eq!(document.pages()[0].page_id().as_str(), "p0");

    apply_ops(
        &mut document,
        &[Op::RemovePage { page_id: PageId::new("p1").expect("page id") }],
        &class,
    )
    .expect("remove page");

    assert_eq!(document.pages().len(), 1);
    assert!(document.line(&line_id("l1")).is_none());
    assert!(document.line(&line_id("l0")).is_some());
}

#[rstest]
fn link_sides_must_match_languages(mut document: Document) {
    let class = WordClass::default();
    let err = apply_ops(
        &mut document,
        &[Op::AddLink {
            link_id: LinkId::new("k:1").expect("link id"),
            french: set([en("l1", 0)]),
            english: set([en("l1", 1)]),
        }],
        &class,
    )
    .unwrap_err();
    assert!(matches!(err, ApplyError::LanguageMismatch { expected: Language::French, .. }));
}

#[rstest]
fn added_then_removed_in_one_batch_is_invisible(mut document: Document) {
    let class = WordClass::default();
    let result = apply_ops(
        &mut document,
        &[
            add_group("g:tmp", set([fr("l1", 0)]), GrammaticalRole::Article),
            Op::RemoveGroup { group_id: group_id("g:tmp") },
        ],
        &class,
    )
    .expect("apply");
    assert!(result.delta.is_empty());
    assert_eq!(result.applied, 2);
}

#[rstest]
fn missing_objects_report_not_found(mut document: Document) {
    let class = WordClass::default();
    let err = apply_ops(
        &mut document,
        &[Op::RemoveConnector { connector_id: connector_id("c:x") }],
        &class,
    )
    .unwrap_err();
    assert_eq!(err, ApplyError::NotFound { kind: ObjectKind::Connector, id: "c:x".to_owned() });
}
