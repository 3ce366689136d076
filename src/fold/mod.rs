// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fold state for one mounted block.
//!
//! Every row carries a counter of currently-folded regions containing it; a row is visible exactly
//! while its counter is zero. Counting (rather than a plain hidden flag) is what keeps overlapping
//! ancestor folds correct under any toggle order: each fold adds one to every member row, each
//! unfold removes exactly that one contribution.

pub mod regions;

pub use regions::{FoldRegion, RegionId, RegionTree};

use crate::model::Block;
use crate::page::{
    DisplayState, ElementId, MountedBlock, MountedRow, Page, ATTR_FOLD_PLACEHOLDER,
    CLASS_DOES_FOLD, CLASS_HOVERED_GUTTER, CLASS_IS_FOLDED, CLASS_IS_UNFOLDED,
    CLASS_UNFOLD_BUTTON,
};

pub const MARKER_UNFOLDED: &str = "▼";
pub const MARKER_FOLDED: &str = "▶";
pub const PLACEHOLDER_TEXT: &str = "⋯";

#[derive(Debug, Clone)]
pub struct FoldController {
    container: ElementId,
    rows: Vec<MountedRow>,
    tree: RegionTree,
    folded: Vec<bool>,
    fold_counts: Vec<u32>,
    placeholders: Vec<ElementId>,
}

impl FoldController {
    /// Builds the region tree for `block` and wires the fold affordances into the page: anchors of
    /// non-empty regions get a `▼` marker and start in the unfolded state; leaf rows get nothing.
    pub fn wire(page: &mut Page, block: &Block, mounted: &MountedBlock) -> Self {
        let tree = RegionTree::for_block(block);
        let folded = vec![false; tree.len()];
        let fold_counts = vec![0; mounted.rows.len()];

        let mut placeholders = Vec::with_capacity(tree.len());
        for id in tree.ids() {
            let anchor = mounted.rows[tree.region(id).anchor()];
            page.set_text(anchor.marker, MARKER_UNFOLDED);
            page.toggle_class(anchor.marker, CLASS_DOES_FOLD, true);
            page.toggle_class(anchor.gutter, CLASS_IS_UNFOLDED, true);
            page.toggle_class(anchor.line, CLASS_IS_UNFOLDED, true);

            let placeholder = page.create_element();
            page.set_text(placeholder, PLACEHOLDER_TEXT);
            page.set_attr(placeholder, ATTR_FOLD_PLACEHOLDER, "true");
            page.toggle_class(placeholder, CLASS_UNFOLD_BUTTON, true);
            placeholders.push(placeholder);
        }

        Self {
            container: mounted.container,
            rows: mounted.rows.clone(),
            tree,
            folded,
            fold_counts,
            placeholders,
        }
    }

    pub fn tree(&self) -> &RegionTree {
        &self.tree
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn rows(&self) -> &[MountedRow] {
        &self.rows
    }

    pub fn is_folded(&self, id: RegionId) -> bool {
        self.folded[id.0]
    }

    pub fn fold_count(&self, row: usize) -> u32 {
        self.fold_counts[row]
    }

    pub fn row_visible(&self, row: usize) -> bool {
        self.fold_counts[row] == 0
    }

    pub fn region_at_anchor(&self, row: usize) -> Option<RegionId> {
        self.tree.region_at_anchor(row)
    }

    /// The region whose placeholder is `element`, if any. Placeholders double as unfold buttons.
    pub fn region_for_placeholder(&self, element: ElementId) -> Option<RegionId> {
        self.placeholders.iter().position(|&p| p == element).map(RegionId)
    }

    /// The region whose fold marker is `element`, if that marker is active.
    pub fn region_for_marker(&self, element: ElementId) -> Option<RegionId> {
        self.tree.ids().find(|&id| self.rows[self.tree.region(id).anchor()].marker == element)
    }

    pub fn toggle(&mut self, page: &mut Page, id: RegionId) {
        if self.is_folded(id) {
            self.unfold(page, id);
        } else {
            self.fold(page, id);
        }
    }

    /// Folds the region: members gain one fold count and disappear; the anchor stays visible,
    /// flips its marker to `▶`, and gets the `⋯` placeholder after its line element.
    ///
    /// Callers go through [`Self::toggle`]; folding an already-folded region is not offered.
    pub fn fold(&mut self, page: &mut Page, id: RegionId) {
        self.folded[id.0] = true;
        let anchor_row = self.tree.region(id).anchor();
        let anchor = self.rows[anchor_row];

        page.set_text(anchor.marker, MARKER_FOLDED);
        page.insert_after(anchor.line, self.placeholders[id.0]);
        self.set_anchor_fold_classes(page, anchor, true);

        let members = self.tree.region(id).members();
        for row in members {
            self.fold_counts[row] += 1;
            let mounted = self.rows[row];
            page.set_display(mounted.gutter, DisplayState::Hidden);
            page.set_display(mounted.line, DisplayState::Hidden);
        }
    }

    /// Unfolds the region: reverses exactly one [`Self::fold`]. Members drop one fold count and
    /// reappear only when no other folded ancestor still covers them. Removing an already-removed
    /// placeholder is a no-op.
    pub fn unfold(&mut self, page: &mut Page, id: RegionId) {
        self.folded[id.0] = false;
        let anchor_row = self.tree.region(id).anchor();
        let anchor = self.rows[anchor_row];

        page.set_text(anchor.marker, MARKER_UNFOLDED);
        page.detach(self.placeholders[id.0]);
        self.set_anchor_fold_classes(page, anchor, false);

        let members = self.tree.region(id).members();
        for row in members {
            self.fold_counts[row] -= 1;
            if self.fold_counts[row] == 0 {
                let mounted = self.rows[row];
                page.set_display(mounted.gutter, DisplayState::Shown);
                page.set_display(mounted.line, DisplayState::Shown);
            }
        }
    }

    fn set_anchor_fold_classes(&self, page: &mut Page, anchor: MountedRow, folded: bool) {
        page.toggle_class(anchor.gutter, CLASS_IS_FOLDED, folded);
        page.toggle_class(anchor.gutter, CLASS_IS_UNFOLDED, !folded);
        page.toggle_class(anchor.line, CLASS_IS_FOLDED, folded);
        page.toggle_class(anchor.line, CLASS_IS_UNFOLDED, !folded);
    }

    /// Marks the block while the pointer is over its gutter column; fold markers are only shown
    /// then, so leaf gutters stay clean.
    pub fn set_gutter_hovered(&self, page: &mut Page, hovered: bool) {
        page.toggle_class(self.container, CLASS_HOVERED_GUTTER, hovered);
    }

    pub fn container_hovered(&self, page: &Page) -> bool {
        page.element(self.container).has_class(CLASS_HOVERED_GUTTER)
    }
}

#[cfg(test)]
mod tests;
