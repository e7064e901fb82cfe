// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use smallvec::SmallVec;

use crate::model::{
    assign_addresses, tokenize, Document, GroupId, HighlightId, Language, LineId, TokenKind,
    WordAddress, WordClass,
};

/// One token of a line with everything a renderer needs to style it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
    /// Set for words only.
    pub address: Option<WordAddress>,
    pub groups: SmallVec<[GroupId; 2]>,
    pub highlights: SmallVec<[HighlightId; 1]>,
    /// For separators: groups that contain both neighbouring words.
    pub bridged_groups: SmallVec<[GroupId; 2]>,
    /// For separators: highlights that contain both neighbouring words.
    pub bridged_highlights: SmallVec<[HighlightId; 1]>,
}

impl RenderedToken<'_> {
    pub fn is_bridged(&self) -> bool {
        !self.bridged_groups.is_empty() || !self.bridged_highlights.is_empty()
    }
}

/// Tokenizes one side of a line and attaches group and highlight membership.
///
/// A separator sitting between two words that share a group (or highlight) is bridged so
/// the decoration draws as one continuous span. Returns `None` for an unknown line.
pub fn decorate_line<'a>(
    document: &'a Document,
    line_id: &LineId,
    language: Language,
    class: &WordClass,
) -> Option<Vec<RenderedToken<'a>>> {
    let line = document.line(line_id)?;
    let tokens = tokenize(line.text(language), class);
    let mut addresses = assign_addresses(&tokens, line_id, language).into_iter().peekable();

    let mut out = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let address = match addresses.peek() {
            Some((token_index, _)) if *token_index == index => {
                addresses.next().map(|(_, address)| address)
            }
            _ => None,
        };

        let (groups, highlights) = match &address {
            Some(address) => (
                document.groups_at(address).map(|(id, _)| id.clone()).collect(),
                document
                    .highlights()
                    .iter()
                    .filter(|(_, highlight)| highlight.addresses().contains(address))
                    .map(|(id, _)| id.clone())
                    .collect(),
            ),
            None => (SmallVec::new(), SmallVec::new()),
        };

        out.push(RenderedToken {
            kind: token.kind(),
            text: token.text(),
            span: token.span(),
            address,
            groups,
            highlights,
            bridged_groups: SmallVec::new(),
            bridged_highlights: SmallVec::new(),
        });
    }

    for index in 1..out.len().saturating_sub(1) {
        if out[index].kind != TokenKind::Separator {
            continue;
        }
        let (before, rest) = out.split_at_mut(index);
        let (current, after) = rest.split_at_mut(1);
        let (prev, next) = (&before[index - 1], &after[0]);
        if !(prev.kind == TokenKind::Word && next.kind == TokenKind::Word) {
            continue;
        }
        current[0].bridged_groups =
            prev.groups.iter().filter(|id| next.groups.contains(id)).cloned().collect();
        current[0].bridged_highlights =
            prev.highlights.iter().filter(|id| next.highlights.contains(id)).cloned().collect();
    }

    Some(out)
}

/// Plain-text rendering of a decorated line: grouped runs are wrapped in brackets.
///
/// `[Le chat] dort.` for a group over the first two words.
pub fn bracket_groups(tokens: &[RenderedToken<'_>]) -> String {
    let mut out = String::new();
    let mut open = false;
    for (index, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Word && !token.groups.is_empty() && !open {
            out.push('[');
            open = true;
        }
        out.push_str(token.text);
        if token.kind != TokenKind::Word || !open {
            continue;
        }
        let bridged = tokens.get(index + 1).is_some_and(|next| !next.bridged_groups.is_empty());
        if !bridged {
            out.push(']');
            open = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::{fixture, rstest};

    use super::{bracket_groups, decorate_line};
    use crate::model::fixtures::{fr, group_id, le_chat_dort, line_id, set};
    use crate::model::{
        Document, GrammaticalRole, Highlight, HighlightId, Language, TokenKind, WordAddress,
        WordClass, WordGroup,
    };

    #[fixture]
    fn document() -> Document {
        le_chat_dort()
    }

    fn group(document: &mut Document, id: &str, addresses: BTreeSet<WordAddress>) {
        let group = WordGroup::with_role(addresses, GrammaticalRole::Subject).expect("group");
        document.groups_mut().insert(group_id(id), group);
    }

    fn bridged_separators(document: &Document) -> Vec<&str> {
        let tokens =
            decorate_line(document, &line_id("l1"), Language::French, &WordClass::default())
                .expect("line");
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Separator && t.is_bridged())
            .map(|t| t.text)
            .collect()
    }

    #[rstest]
    fn words_carry_addresses_and_groups(mut document: Document) {
        group(&mut document, "subject", set([fr("l1", 0), fr("l1", 1)]));
        let tokens =
            decorate_line(&document, &line_id("l1"), Language::French, &WordClass::default())
                .expect("line");

        let words = tokens.iter().filter(|t| t.kind == TokenKind::Word).collect::<Vec<_>>();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].address, Some(fr("l1", 0)));
        assert_eq!(words[1].groups.as_slice(), &[group_id("subject")]);
        assert!(words[2].groups.is_empty());
        let mut separators = tokens.iter().filter(|t| t.kind == TokenKind::Separator);
        assert!(separators.all(|t| t.address.is_none()));
    }

    #[rstest]
    fn separator_inside_group_is_bridged(mut document: Document) {
        group(&mut document, "subject", set([fr("l1", 0), fr("l1", 1)]));
        assert_eq!(bridged_separators(&document), vec![" "]);

        // Shrinking the group to one word removes the bridge.
        group(&mut document, "subject", set([fr("l1", 1)]));
        assert!(bridged_separators(&document).is_empty());
    }

    #[rstest]
    fn adjacent_groups_do_not_bridge(mut document: Document) {
        group(&mut document, "subject", set([fr("l1", 0), fr("l1", 1)]));
        group(&mut document, "verb", set([fr("l1", 2)]));
        let tokens =
            decorate_line(&document, &line_id("l1"), Language::French, &WordClass::default())
                .expect("line");
        // "Le", " ", "chat", " ", "dort", "."
        assert!(tokens[1].is_bridged());
        assert!(!tokens[3].is_bridged());
        assert!(!tokens[5].is_bridged());
    }

    #[rstest]
    fn highlights_bridge_like_groups(mut document: Document) {
        let id = HighlightId::new("h1").expect("highlight id");
        document
            .highlights_mut()
            .insert(id.clone(), Highlight::new(set([fr("l1", 1), fr("l1", 2)]), "#fde68a"));
        let tokens =
            decorate_line(&document, &line_id("l1"), Language::French, &WordClass::default())
                .expect("line");
        assert_eq!(tokens[3].bridged_highlights.as_slice(), &[id]);
        assert!(tokens[3].bridged_groups.is_empty());
        assert!(!tokens[1].is_bridged());
    }

    #[rstest]
    fn unknown_line_is_none(document: Document) {
        let missing = line_id("nope");
        let tokens = decorate_line(&document, &missing, Language::English, &WordClass::default());
        assert!(tokens.is_none());
    }

    #[rstest]
    #[case(&["subject:0-1"], "[Le chat] dort.")]
    #[case(&["subject:0-1", "verb:2-2"], "[Le chat] [dort].")]
    #[case(&[], "Le chat dort.")]
    fn brackets_follow_bridges(
        mut document: Document,
        #[case] groups: &[&str],
        #[case] expected: &str,
    ) {
        for spec in groups {
            let (id, range) = spec.split_once(':').expect("id:range");
            let (from, to) = range.split_once('-').expect("from-to");
            let from = from.parse::<usize>().expect("from");
            let to = to.parse::<usize>().expect("to");
            group(&mut document, id, (from..=to).map(|i| fr("l1", i)).collect());
        }
        let tokens =
            decorate_line(&document, &line_id("l1"), Language::French, &WordClass::default())
                .expect("line");
        assert_eq!(bracket_groups(&tokens), expected);
    }
}
