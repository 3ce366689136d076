// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{Block, BlockId, LineTarget, RefName, Row};
use crate::page::{mount_block, Page, ATTR_HL, ATTR_REF};

use super::{
    LineHighlightSession, RefHighlightSession, Rule, Selector, Shade,
};

fn block_id(raw: &str) -> BlockId {
    BlockId::new(raw).expect("block id")
}

fn name(raw: &str) -> RefName {
    RefName::new(raw).expect("ref name")
}

fn lines(numbers: &[u32]) -> BTreeSet<u32> {
    numbers.iter().copied().collect()
}

fn selectors(session_rules: &[Rule]) -> Vec<String> {
    session_rules.iter().map(|rule| rule.selector().to_string()).collect()
}

#[test]
fn line_default_renders_id_and_adjacent_rules() {
    let mut session = LineHighlightSession::new();
    session.set_default(Some(LineTarget::new(block_id("blockA"), lines(&[3]))));

    assert_eq!(selectors(session.stylesheet().rules()), vec!["#blockAL3", "#blockAL3+*"]);
    assert!(session.stylesheet().rules().iter().all(|rule| rule.shade() == Shade::Strong));
}

#[test]
fn hover_replaces_default_and_exit_restores_it() {
    let mut session = LineHighlightSession::new();
    session.set_default(Some(LineTarget::new(block_id("blockA"), lines(&[3]))));

    let mut page = Page::new();
    let hovered = page.create_element();
    session.enter_hover(hovered, LineTarget::new(block_id("blockA"), lines(&[7])));
    assert_eq!(selectors(session.stylesheet().rules()), vec!["#blockAL7", "#blockAL7+*"]);

    session.exit_hover(hovered);
    assert_eq!(selectors(session.stylesheet().rules()), vec!["#blockAL3", "#blockAL3+*"]);
}

#[test]
fn exit_with_no_default_leaves_an_empty_stylesheet() {
    let mut session = LineHighlightSession::new();
    session.set_default(None);

    let mut page = Page::new();
    let hovered = page.create_element();
    session.enter_hover(hovered, LineTarget::new(block_id("blockA"), lines(&[1, 2])));
    assert_eq!(session.stylesheet().len(), 4);

    session.exit_hover(hovered);
    assert!(session.stylesheet().is_empty());
}

#[test]
fn exit_of_a_non_hovered_element_is_a_no_op() {
    let mut session = LineHighlightSession::new();
    let mut page = Page::new();
    let current = page.create_element();
    let stale = page.create_element();

    session.enter_hover(current, LineTarget::new(block_id("blockA"), lines(&[5])));
    session.exit_hover(stale);
    assert_eq!(selectors(session.stylesheet().rules()), vec!["#blockAL5", "#blockAL5+*"]);

    // A duplicate leave for the real element after the first one is equally harmless.
    session.exit_hover(current);
    session.exit_hover(current);
    assert!(session.stylesheet().is_empty());
}

#[test]
fn ref_rules_shade_references_soft_and_definitions_strong() {
    let mut session = RefHighlightSession::new();
    session.set_default(Some(name("ziptree")));

    let rules = session.stylesheet().rules();
    assert_eq!(
        selectors(rules),
        vec!["[data-ref=ziptree][data-hl]", "#ziptree > [data-ref=ziptree][data-hl]"]
    );
    assert_eq!(rules[0].shade(), Shade::Soft);
    assert_eq!(rules[1].shade(), Shade::Strong);
    assert_eq!(
        rules[0].css_text(),
        "[data-ref=ziptree][data-hl] { background: rgba(255, 228, 0, 0.1); }"
    );
}

#[test]
fn selector_matching_for_line_rules_follows_sibling_structure() {
    let rows = vec![Row::new(1, 0, "a"), Row::new(2, 1, "b")];
    let block = Block::new(block_id("blockA"), rows).expect("block");
    let mut page = Page::new();
    let mounted = mount_block(&mut page, &block);

    let id_rule = Selector::Id("blockAL1".into());
    let adjacent_rule = Selector::IdAdjacent("blockAL1".into());

    assert!(id_rule.matches(&page, mounted.rows[0].gutter));
    assert!(!id_rule.matches(&page, mounted.rows[0].line));
    assert!(adjacent_rule.matches(&page, mounted.rows[0].line));
    assert!(!adjacent_rule.matches(&page, mounted.rows[1].gutter));
}

#[test]
fn selector_matching_distinguishes_defining_container() {
    let mut page = Page::new();
    let container = page.create_element();
    page.set_html_id(container, "ziptree");
    page.append_child(page.root(), container);

    let definition = page.create_element();
    page.set_attr(definition, ATTR_REF, "ziptree");
    page.set_attr(definition, ATTR_HL, "true");
    page.append_child(container, definition);

    let mention = page.create_element();
    page.set_attr(mention, ATTR_REF, "ziptree");
    page.set_attr(mention, ATTR_HL, "true");
    page.append_child(page.root(), mention);

    let unmarked = page.create_element();
    page.set_attr(unmarked, ATTR_REF, "ziptree");
    page.append_child(page.root(), unmarked);

    let marked = Selector::RefMarked(name("ziptree"));
    let defining = Selector::RefInDefiningContainer(name("ziptree"));

    assert!(marked.matches(&page, definition));
    assert!(marked.matches(&page, mention));
    assert!(!marked.matches(&page, unmarked));
    assert!(defining.matches(&page, definition));
    assert!(!defining.matches(&page, mention));
}

#[test]
fn stylesheet_reports_strongest_matching_shade() {
    let mut page = Page::new();
    let container = page.create_element();
    page.set_html_id(container, "ziptree");
    page.append_child(page.root(), container);
    let definition = page.create_element();
    page.set_attr(definition, ATTR_REF, "ziptree");
    page.set_attr(definition, ATTR_HL, "true");
    page.append_child(container, definition);

    let mut session = RefHighlightSession::new();
    session.set_default(Some(name("ziptree")));

    // The definition matches both the soft reference rule and the strong container rule.
    assert_eq!(session.stylesheet().shade_for(&page, definition), Some(Shade::Strong));
    assert_eq!(session.stylesheet().shade_for(&page, container), None);
}

#[test]
fn empty_line_target_renders_no_rules() {
    let mut session = LineHighlightSession::new();
    session.set_default(Some(LineTarget::new(block_id("blockA"), lines(&[]))));
    assert!(session.stylesheet().is_empty());
}
