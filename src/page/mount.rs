// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mounts article content into the element arena.
//!
//! This reproduces the structure the document generator emits: a block container whose children
//! alternate gutter and line elements, and prose elements carrying the marker-attribute sets the
//! dispatch layer resolves hover anchors against.

use smol_str::SmolStr;

use crate::model::{line_element_id, Article, Block, Callout, Definition, Mention};

use super::{
    ElementId, Page, ATTR_HL, ATTR_HLLINES, ATTR_INDENT, ATTR_PREVIEW_ANCHOR, ATTR_PSEUDOCODE,
    ATTR_REF, CLASS_PSEUDOCODE,
};

/// Element ids of one mounted row: the gutter (with its line-number and fold-marker children)
/// followed by the line element as the gutter's next sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedRow {
    pub gutter: ElementId,
    pub number: ElementId,
    pub marker: ElementId,
    pub line: ElementId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBlock {
    pub container: ElementId,
    pub rows: Vec<MountedRow>,
}

/// What kind of prose anchor an element was mounted for. Used by the viewer surface to label
/// list items; the dispatch layer only ever looks at marker attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProseKind {
    Callout,
    Definition,
    Mention,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleDom {
    pub blocks: Vec<MountedBlock>,
    pub prose: Vec<(ProseKind, ElementId)>,
}

pub fn mount_block(page: &mut Page, block: &Block) -> MountedBlock {
    let container = page.create_element();
    page.toggle_class(container, CLASS_PSEUDOCODE, true);
    page.append_child(page.root(), container);

    let mut digits = itoa::Buffer::new();
    let mut rows = Vec::with_capacity(block.len());
    for row in block.rows() {
        let gutter = page.create_element();
        page.set_html_id(gutter, line_element_id(block.block_id(), row.line_no()));
        page.set_attr(gutter, ATTR_INDENT, SmolStr::from(digits.format(row.indent())));

        let number = page.create_element();
        page.set_text(number, digits.format(row.line_no()));
        page.append_child(gutter, number);

        let marker = page.create_element();
        page.append_child(gutter, marker);

        let line = page.create_element();
        page.set_text(line, row.text());

        page.append_child(container, gutter);
        page.append_child(container, line);

        rows.push(MountedRow {
            gutter,
            number,
            marker,
            line,
        });
    }

    MountedBlock { container, rows }
}

fn mount_callout(page: &mut Page, parent: ElementId, callout: &Callout) -> ElementId {
    let element = page.create_element();
    page.set_text(element, callout.text());
    page.set_attr(element, ATTR_REF, callout.block().as_str());
    page.set_attr(element, ATTR_PREVIEW_ANCHOR, "true");
    page.set_attr(element, ATTR_PSEUDOCODE, callout.block().as_str());
    page.set_attr(element, ATTR_HLLINES, callout.lines_encoded());
    page.append_child(parent, element);
    element
}

/// Mounts the defining container; the returned element is the marked term inside it, which is the
/// hoverable anchor (the container itself carries only the id).
fn mount_definition(page: &mut Page, parent: ElementId, definition: &Definition) -> ElementId {
    let container = page.create_element();
    page.set_html_id(container, definition.name().as_str());
    page.append_child(parent, container);

    let term = page.create_element();
    page.set_text(term, definition.term());
    page.set_attr(term, ATTR_REF, definition.name().as_str());
    page.set_attr(term, ATTR_PREVIEW_ANCHOR, "true");
    page.set_attr(term, ATTR_HL, "true");
    page.append_child(container, term);

    let body = page.create_element();
    page.set_text(body, definition.body());
    page.append_child(container, body);

    term
}

fn mount_mention(page: &mut Page, parent: ElementId, mention: &Mention) -> ElementId {
    let element = page.create_element();
    page.set_text(element, mention.text());
    page.set_attr(element, ATTR_REF, mention.name().as_str());
    page.set_attr(element, ATTR_PREVIEW_ANCHOR, "true");
    page.set_attr(element, ATTR_HL, "true");
    page.append_child(parent, element);
    element
}

pub fn mount_article(page: &mut Page, article: &Article) -> ArticleDom {
    let mut dom = ArticleDom::default();

    for block in article.blocks() {
        dom.blocks.push(mount_block(page, block));
    }

    let prose = page.create_element();
    page.append_child(page.root(), prose);
    for callout in article.callouts() {
        let element = mount_callout(page, prose, callout);
        dom.prose.push((ProseKind::Callout, element));
    }
    for definition in article.definitions() {
        let element = mount_definition(page, prose, definition);
        dom.prose.push((ProseKind::Definition, element));
    }
    for mention in article.mentions() {
        let element = mount_mention(page, prose, mention);
        dom.prose.push((ProseKind::Mention, element));
    }

    dom
}

#[cfg(test)]
mod tests {
    use super::{mount_article, mount_block};
    use crate::model::{Article, Block, BlockId, Callout, Definition, Mention, RefName, Row};
    use crate::page::{Page, ATTR_HL, ATTR_HLLINES, ATTR_INDENT, ATTR_PSEUDOCODE, ATTR_REF};

    fn sample_block() -> Block {
        let rows = vec![Row::new(1, 0, "loop:"), Row::new(2, 1, "step"), Row::new(3, 1, "done")];
        Block::new(BlockId::new("blockA").expect("id"), rows).expect("block")
    }

    #[test]
    fn mounted_rows_alternate_gutter_and_line() {
        let mut page = Page::new();
        let mounted = mount_block(&mut page, &sample_block());

        let children = page.element(mounted.container).children();
        assert_eq!(children.len(), 6);
        for (index, row) in mounted.rows.iter().enumerate() {
            assert_eq!(children[index * 2], row.gutter);
            assert_eq!(children[index * 2 + 1], row.line);
            assert_eq!(page.next_sibling(row.gutter), Some(row.line));
        }
    }

    #[test]
    fn gutters_carry_line_id_and_indent() {
        let mut page = Page::new();
        let mounted = mount_block(&mut page, &sample_block());

        let gutter = page.element(mounted.rows[1].gutter);
        assert_eq!(gutter.html_id(), Some("blockAL2"));
        assert_eq!(gutter.attr(ATTR_INDENT), Some("1"));
        assert_eq!(page.by_html_id("blockAL2"), Some(mounted.rows[1].gutter));
    }

    #[test]
    fn prose_anchors_carry_their_domain_marker_sets() {
        let block_id = BlockId::new("blockA").expect("id");
        let name = RefName::new("ziptree").expect("name");
        let article = Article::new(
            "t",
            vec![sample_block()],
            vec![Callout::new("see the loop", block_id, "2-3")],
            vec![Definition::new(name.clone(), "zip tree", "a randomized tree")],
            vec![Mention::new(name, "zip trees")],
        );

        let mut page = Page::new();
        let dom = mount_article(&mut page, &article);
        assert_eq!(dom.prose.len(), 3);

        let callout = page.element(dom.prose[0].1);
        assert_eq!(callout.attr(ATTR_PSEUDOCODE), Some("blockA"));
        assert_eq!(callout.attr(ATTR_HLLINES), Some("2-3"));
        assert!(!callout.has_attr(ATTR_HL));

        let term = page.element(dom.prose[1].1);
        assert_eq!(term.attr(ATTR_REF), Some("ziptree"));
        assert!(term.has_attr(ATTR_HL));
        let container = term.parent().expect("container");
        assert_eq!(page.element(container).html_id(), Some("ziptree"));

        let mention = page.element(dom.prose[2].1);
        assert!(mention.has_attr(ATTR_HL));
        assert_eq!(mention.parent(), callout.parent());
    }
}
