// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derives the nested fold-region structure of a block from its flat indent sequence.
//!
//! A row anchors a region exactly when the maximal contiguous run of rows after it with strictly
//! greater indent is non-empty; that run is the region's membership. Runs of different anchors
//! never partially overlap, so the regions form a forest, which is materialized here with
//! parent/child links so fold bookkeeping never has to rescan indents.

use smallvec::SmallVec;

use crate::model::Block;

/// Arena handle for one region within a [`RegionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    anchor: usize,
    end: usize,
    parent: Option<RegionId>,
    children: SmallVec<[RegionId; 4]>,
}

impl FoldRegion {
    /// Row index of the anchor. The anchor is not a member of its own region.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Row index of the last member.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Row indices strictly inside the region, in order.
    pub fn members(&self) -> std::ops::RangeInclusive<usize> {
        self.anchor + 1..=self.end
    }

    pub fn member_count(&self) -> usize {
        self.end - self.anchor
    }

    pub fn contains_row(&self, row: usize) -> bool {
        row > self.anchor && row <= self.end
    }

    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    pub fn children(&self) -> &[RegionId] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionTree {
    regions: Vec<FoldRegion>,
    anchor_region: Vec<Option<RegionId>>,
}

impl RegionTree {
    /// Builds the region forest in one right-to-left pass.
    ///
    /// The scan keeps a stack of row indices whose indents are, from bottom to top, non-increasing;
    /// popping rows with greater indent leaves the next row at-or-below the current indent on top,
    /// which bounds the current row's member run.
    pub fn from_indents(indents: &[u32]) -> Self {
        let row_count = indents.len();
        let mut run_end = vec![0usize; row_count];
        let mut bounds: Vec<usize> = Vec::new();
        for row in (0..row_count).rev() {
            while let Some(&candidate) = bounds.last() {
                if indents[candidate] > indents[row] {
                    bounds.pop();
                } else {
                    break;
                }
            }
            run_end[row] = match bounds.last() {
                Some(&bound) => bound - 1,
                None => row_count - 1,
            };
            bounds.push(row);
        }

        let mut tree = Self {
            regions: Vec::new(),
            anchor_region: vec![None; row_count],
        };
        let mut open: Vec<RegionId> = Vec::new();
        for anchor in 0..row_count {
            if run_end[anchor] <= anchor {
                continue;
            }
            while let Some(&enclosing) = open.last() {
                if tree.regions[enclosing.0].end < anchor {
                    open.pop();
                } else {
                    break;
                }
            }
            let parent = open.last().copied();
            let id = RegionId(tree.regions.len());
            tree.regions.push(FoldRegion {
                anchor,
                end: run_end[anchor],
                parent,
                children: SmallVec::new(),
            });
            if let Some(parent) = parent {
                tree.regions[parent.0].children.push(id);
            }
            tree.anchor_region[anchor] = Some(id);
            open.push(id);
        }

        tree
    }

    pub fn for_block(block: &Block) -> Self {
        Self::from_indents(&block.indents())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, id: RegionId) -> &FoldRegion {
        &self.regions[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len()).map(RegionId)
    }

    pub fn region_at_anchor(&self, row: usize) -> Option<RegionId> {
        self.anchor_region.get(row).copied().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.anchor_region.len()
    }
}
