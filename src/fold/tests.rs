// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Block, BlockId, Row};
use crate::page::{mount_block, MountedBlock, Page, CLASS_IS_FOLDED, CLASS_IS_UNFOLDED};

use super::{FoldController, RegionId, MARKER_FOLDED, MARKER_UNFOLDED, PLACEHOLDER_TEXT};

fn block_from_indents(indents: &[u32]) -> Block {
    let rows = indents
        .iter()
        .enumerate()
        .map(|(index, &indent)| Row::new(index as u32 + 1, indent, format!("line {}", index + 1)))
        .collect();
    Block::new(BlockId::new("blockA").expect("id"), rows).expect("block")
}

fn wired(indents: &[u32]) -> (Page, MountedBlock, FoldController) {
    let block = block_from_indents(indents);
    let mut page = Page::new();
    let mounted = mount_block(&mut page, &block);
    let controller = FoldController::wire(&mut page, &block, &mounted);
    (page, mounted, controller)
}

/// Recomputes each row's expected fold count from scratch: the number of currently-folded regions
/// that contain the row. The controller's incremental counters must always agree.
fn assert_fold_invariant(page: &Page, controller: &FoldController) {
    let tree = controller.tree();
    for row in 0..tree.row_count() {
        let expected = tree
            .ids()
            .filter(|&id| controller.is_folded(id) && tree.region(id).contains_row(row))
            .count() as u32;
        assert_eq!(controller.fold_count(row), expected, "fold count of row {row}");
        assert_eq!(controller.row_visible(row), expected == 0, "visibility of row {row}");

        let mounted = controller.rows()[row];
        assert_eq!(page.element(mounted.gutter).is_shown(), expected == 0);
        assert_eq!(page.element(mounted.line).is_shown(), expected == 0);
    }
}

#[test]
fn wiring_marks_only_anchors_of_nonempty_regions() {
    let (page, mounted, controller) = wired(&[0, 1, 1, 2, 0]);

    assert_eq!(page.element(mounted.rows[0].marker).text(), MARKER_UNFOLDED);
    assert_eq!(page.element(mounted.rows[2].marker).text(), MARKER_UNFOLDED);
    for leaf in [1, 3, 4] {
        assert_eq!(page.element(mounted.rows[leaf].marker).text(), "");
        assert!(controller.region_at_anchor(leaf).is_none());
    }
    assert!(page.element(mounted.rows[0].gutter).has_class(CLASS_IS_UNFOLDED));
}

#[test]
fn fold_hides_members_but_not_the_anchor() {
    let (mut page, mounted, mut controller) = wired(&[0, 1, 1, 2, 0]);
    let outer = controller.region_at_anchor(0).expect("outer region");

    controller.fold(&mut page, outer);

    assert!(page.element(mounted.rows[0].gutter).is_shown());
    for hidden in 1..=3 {
        assert!(!page.element(mounted.rows[hidden].gutter).is_shown(), "row {hidden}");
        assert!(!page.element(mounted.rows[hidden].line).is_shown(), "row {hidden}");
    }
    assert!(page.element(mounted.rows[4].gutter).is_shown());
    assert_eq!(page.element(mounted.rows[0].marker).text(), MARKER_FOLDED);
    assert!(page.element(mounted.rows[0].gutter).has_class(CLASS_IS_FOLDED));
    assert_fold_invariant(&page, &controller);
}

#[test]
fn fold_inserts_placeholder_after_anchor_line_and_unfold_removes_it() {
    let (mut page, mounted, mut controller) = wired(&[0, 1, 2, 1, 0]);
    let outer = controller.region_at_anchor(0).expect("outer region");

    controller.fold(&mut page, outer);
    let placeholder = page.next_sibling(mounted.rows[0].line).expect("placeholder");
    assert_eq!(page.element(placeholder).text(), PLACEHOLDER_TEXT);
    assert_eq!(controller.region_for_placeholder(placeholder), Some(outer));

    controller.unfold(&mut page, outer);
    assert_eq!(page.next_sibling(mounted.rows[0].line), Some(mounted.rows[1].gutter));
    assert!(!page.is_attached(placeholder));
}

#[test]
fn unfolding_outer_keeps_inner_fold_members_hidden() {
    let (mut page, mounted, mut controller) = wired(&[0, 1, 2, 1, 0]);
    let outer = controller.region_at_anchor(0).expect("outer");
    let inner = controller.region_at_anchor(1).expect("inner");

    controller.fold(&mut page, inner);
    controller.fold(&mut page, outer);
    controller.unfold(&mut page, outer);

    // Row 1 (the inner anchor) is only covered by the outer fold, so it comes back; row 2 is
    // still covered by the inner fold.
    assert!(page.element(mounted.rows[1].gutter).is_shown());
    assert!(!page.element(mounted.rows[2].gutter).is_shown());
    assert_eq!(controller.fold_count(2), 1);
    assert_fold_invariant(&page, &controller);

    controller.unfold(&mut page, inner);
    assert_fold_invariant(&page, &controller);
}

#[test]
fn one_unfold_reverses_exactly_one_fold_under_interleavings() {
    let (mut page, _mounted, mut controller) = wired(&[0, 1, 2, 3, 1, 2, 0]);
    let regions = controller.tree().ids().collect::<Vec<_>>();
    assert!(regions.len() >= 3);

    for &probe in &regions {
        // Surround the probe fold with unrelated toggles in several orders.
        for &other in &regions {
            if other == probe {
                continue;
            }
            let counts_before = snapshot_counts(&controller);
            controller.fold(&mut page, other);
            controller.fold(&mut page, probe);
            controller.unfold(&mut page, probe);
            controller.unfold(&mut page, other);
            assert_eq!(snapshot_counts(&controller), counts_before);
            assert_fold_invariant(&page, &controller);
        }
    }
}

#[test]
fn every_toggle_sequence_preserves_the_count_invariant() {
    let (mut page, _mounted, mut controller) = wired(&[0, 1, 1, 2, 0, 1, 2, 2, 3, 0]);
    let regions = controller.tree().ids().collect::<Vec<_>>();

    // Deterministic pseudo-random walk over toggles; the invariant must hold after every step.
    let mut state = 0x5eed_u32;
    for _ in 0..200 {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        let pick = regions[(state >> 16) as usize % regions.len()];
        controller.toggle(&mut page, pick);
        assert_fold_invariant(&page, &controller);
    }
}

#[test]
fn fold_then_unfold_restores_prefold_state_regardless_of_other_regions() {
    let (mut page, _mounted, mut controller) = wired(&[0, 1, 2, 1, 0, 1, 1]);
    let regions = controller.tree().ids().collect::<Vec<_>>();

    // Put the controller into a mixed state first.
    controller.toggle(&mut page, *regions.last().expect("region"));

    for &region in &regions {
        if controller.is_folded(region) {
            continue;
        }
        let counts_before = snapshot_counts(&controller);
        let visible_before = snapshot_visibility(&controller);
        controller.fold(&mut page, region);
        controller.unfold(&mut page, region);
        assert_eq!(snapshot_counts(&controller), counts_before);
        assert_eq!(snapshot_visibility(&controller), visible_before);
        assert_fold_invariant(&page, &controller);
    }
}

#[test]
fn marker_hit_testing_resolves_regions() {
    let (mut page, mounted, mut controller) = wired(&[0, 1, 2, 1, 0]);
    let outer = controller.region_at_anchor(0).expect("outer");

    assert_eq!(controller.region_for_marker(mounted.rows[0].marker), Some(outer));
    assert_eq!(controller.region_for_marker(mounted.rows[4].marker), None);

    controller.fold(&mut page, outer);
    let placeholder = page.next_sibling(mounted.rows[0].line).expect("placeholder");
    controller.toggle(&mut page, controller.region_for_placeholder(placeholder).expect("region"));
    assert!(!controller.is_folded(outer));
    assert_fold_invariant(&page, &controller);
}

#[test]
fn gutter_hover_toggles_the_block_class() {
    let (mut page, _mounted, controller) = wired(&[0, 1]);
    controller.set_gutter_hovered(&mut page, true);
    assert!(page.element(controller.container()).has_class(crate::page::CLASS_HOVERED_GUTTER));
    controller.set_gutter_hovered(&mut page, false);
    assert!(!page.element(controller.container()).has_class(crate::page::CLASS_HOVERED_GUTTER));
}

fn snapshot_counts(controller: &FoldController) -> Vec<u32> {
    (0..controller.tree().row_count()).map(|row| controller.fold_count(row)).collect()
}

fn snapshot_visibility(controller: &FoldController) -> Vec<bool> {
    (0..controller.tree().row_count()).map(|row| controller.row_visible(row)).collect()
}

#[test]
fn region_ids_are_stable_between_tree_and_controller() {
    let (_page, _mounted, controller) = wired(&[0, 1, 1, 2, 0]);
    let ids = controller.tree().ids().collect::<Vec<_>>();
    assert_eq!(ids, vec![RegionId(0), RegionId(1)]);
    assert_eq!(controller.tree().region(RegionId(1)).anchor(), 2);
}
