// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeSet;

use proteus::model::{Block, BlockId, LineTarget, Row};

/// Indent profile of a synthetic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentCase {
    /// Everything at indent 0; no regions at all.
    Flat,
    /// Repeating 0,1,2,3 ramps; many small regions.
    Sawtooth,
    /// One long descent followed by one long ascent; deeply nested regions.
    Vee,
    /// A mix resembling real listings: short bodies, sibling runs, occasional deep step.
    PaperLike,
}

impl IndentCase {
    pub fn id(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Sawtooth => "sawtooth",
            Self::Vee => "vee",
            Self::PaperLike => "paper_like",
        }
    }
}

pub fn indents(case: IndentCase, rows: usize) -> Vec<u32> {
    match case {
        IndentCase::Flat => vec![0; rows],
        IndentCase::Sawtooth => (0..rows).map(|row| (row % 4) as u32).collect(),
        IndentCase::Vee => {
            let half = rows / 2;
            (0..rows)
                .map(|row| if row < half { row as u32 } else { (rows - row - 1) as u32 })
                .collect()
        }
        IndentCase::PaperLike => {
            const PATTERN: [u32; 12] = [0, 1, 1, 2, 2, 1, 2, 3, 1, 1, 0, 1];
            (0..rows).map(|row| PATTERN[row % PATTERN.len()]).collect()
        }
    }
}

pub fn block(case: IndentCase, rows: usize) -> Block {
    let rows = indents(case, rows)
        .into_iter()
        .enumerate()
        .map(|(index, indent)| Row::new(index as u32 + 1, indent, format!("line {}", index + 1)))
        .collect();
    Block::new(BlockId::new("bench").expect("block id"), rows).expect("bench block")
}

/// An encoding naming every `stride`-th line of `1..=rows` as alternating singles and short runs.
pub fn encoded_ranges(rows: u32, stride: u32) -> String {
    let mut out = String::new();
    let mut line = 1;
    let mut single = true;
    while line <= rows {
        if !out.is_empty() {
            out.push('.');
        }
        if single || line + 1 > rows {
            out.push_str(&line.to_string());
        } else {
            out.push_str(&format!("{}-{}", line, line + 1));
        }
        single = !single;
        line += stride;
    }
    out
}

pub fn line_target(rows: u32, stride: u32) -> LineTarget {
    let lines: BTreeSet<u32> = (1..=rows).step_by(stride as usize).collect();
    LineTarget::new(BlockId::new("bench").expect("block id"), lines)
}

/// Stable checksum so benchmark results cannot be optimized away dishonestly.
pub fn checksum_regions(tree: &proteus::fold::RegionTree) -> u64 {
    let mut sum = 0u64;
    for id in tree.ids() {
        let region = tree.region(id);
        sum = sum
            .wrapping_mul(31)
            .wrapping_add(region.anchor() as u64)
            .wrapping_add((region.end() as u64) << 16);
    }
    sum
}
