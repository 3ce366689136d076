// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Minimal document host: an arena of elements with data attributes, classes and display state.
//!
//! This models only what the interaction core consumes from the rendered article: parent links
//! for the ancestor walk, ordered children for sibling adjacency, `data-*` markers, and a display
//! state standing in for `style.display`. It is not a DOM.

use std::collections::BTreeMap;

use smol_str::SmolStr;

mod mount;

pub use mount::{mount_article, mount_block, ArticleDom, MountedBlock, MountedRow, ProseKind};

pub const ATTR_REF: &str = "data-ref";
pub const ATTR_PREVIEW_ANCHOR: &str = "data-preview-anchor";
pub const ATTR_PSEUDOCODE: &str = "data-pseudocode";
pub const ATTR_HLLINES: &str = "data-hllines";
pub const ATTR_HL: &str = "data-hl";
pub const ATTR_INDENT: &str = "data-i";
pub const ATTR_FOLD_PLACEHOLDER: &str = "data-fold-placeholder";

pub const CLASS_PSEUDOCODE: &str = "pseudocode";
pub const CLASS_DOES_FOLD: &str = "doesFold";
pub const CLASS_IS_FOLDED: &str = "isFolded";
pub const CLASS_IS_UNFOLDED: &str = "isUnfolded";
pub const CLASS_HOVERED_GUTTER: &str = "hoveredGutter";
pub const CLASS_UNFOLD_BUTTON: &str = "unfoldButton";

/// Arena handle for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Shown,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct Element {
    html_id: Option<SmolStr>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attrs: BTreeMap<SmolStr, SmolStr>,
    classes: Vec<SmolStr>,
    display: DisplayState,
    text: String,
}

impl Element {
    fn new() -> Self {
        Self {
            html_id: None,
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            display: DisplayState::Shown,
            text: String::new(),
        }
    }

    pub fn html_id(&self) -> Option<&str> {
        self.html_id.as_deref()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(SmolStr::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn is_shown(&self) -> bool {
        self.display == DisplayState::Shown
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The element arena for one loaded article.
///
/// Elements are never freed; detaching removes an element from its parent's child list while the
/// arena slot stays valid, which is what makes placeholder re-insertion cheap.
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
    by_html_id: BTreeMap<SmolStr, ElementId>,
    root: ElementId,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let mut page = Self {
            elements: Vec::new(),
            by_html_id: BTreeMap::new(),
            root: ElementId(0),
        };
        page.root = page.create_element();
        page
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Creates a detached element.
    pub fn create_element(&mut self) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new());
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Assigns the element's id attribute. The first element registered under an id wins lookup,
    /// mirroring `getElementById` on documents with duplicate ids.
    pub fn set_html_id(&mut self, id: ElementId, html_id: impl Into<SmolStr>) {
        let html_id = html_id.into();
        self.element_mut(id).html_id = Some(html_id.clone());
        self.by_html_id.entry(html_id).or_insert(id);
    }

    pub fn by_html_id(&self, html_id: &str) -> Option<ElementId> {
        self.by_html_id.get(html_id).copied()
    }

    pub fn set_attr(&mut self, id: ElementId, name: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        self.element_mut(id).attrs.insert(name.into(), value.into());
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.element_mut(id).text = text.into();
    }

    pub fn set_display(&mut self, id: ElementId, display: DisplayState) {
        self.element_mut(id).display = display;
    }

    /// Adds or removes a class, like `classList.toggle(class, on)`.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        let element = self.element_mut(id);
        let present = element.classes.iter().position(|c| c == class);
        match (present, on) {
            (None, true) => element.classes.push(SmolStr::from(class)),
            (Some(index), false) => {
                element.classes.remove(index);
            }
            _ => {}
        }
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    /// Inserts `element` as the next sibling of `sibling`. A detached sibling makes this a no-op.
    pub fn insert_after(&mut self, sibling: ElementId, element: ElementId) {
        let Some(parent) = self.element(sibling).parent else {
            return;
        };
        self.detach(element);
        let position = self
            .element(parent)
            .children
            .iter()
            .position(|&c| c == sibling)
            .map(|index| index + 1)
            .unwrap_or_else(|| self.element(parent).children.len());
        self.element_mut(element).parent = Some(parent);
        self.element_mut(parent).children.insert(position, element);
    }

    /// Removes the element from its parent's child list. Already-detached elements are a no-op.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element(id).parent else {
            return;
        };
        self.element_mut(parent).children.retain(|&c| c != id);
        self.element_mut(id).parent = None;
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        self.element(id).parent.is_some() || id == self.root
    }

    pub fn prev_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.element(id).parent?;
        let children = &self.element(parent).children;
        let position = children.iter().position(|&c| c == id)?;
        position.checked_sub(1).map(|index| children[index])
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.element(id).parent?;
        let children = &self.element(parent).children;
        let position = children.iter().position(|&c| c == id)?;
        children.get(position + 1).copied()
    }

    /// The element itself followed by its ancestors up to the root.
    pub fn ancestors_inclusive(&self, id: ElementId) -> AncestorsInclusive<'_> {
        AncestorsInclusive {
            page: self,
            next: Some(id),
        }
    }
}

pub struct AncestorsInclusive<'a> {
    page: &'a Page,
    next: Option<ElementId>,
}

impl Iterator for AncestorsInclusive<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.page.element(current).parent;
        Some(current)
    }
}
