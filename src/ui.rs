// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared viewer state.
//!
//! Carries selection context between event handling and drawing. The revision counter lets the
//! draw path cheaply detect whether anything changed since the last frame.

use crate::page::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Listing,
    Prose,
}

impl PaneFocus {
    pub fn cycle(self) -> Self {
        match self {
            Self::Listing => Self::Prose,
            Self::Prose => Self::Listing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    rev: u64,
    focus: PaneFocus,
    listing_cursor: usize,
    prose_cursor: usize,
    hovered_prose: Option<ElementId>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            rev: 0,
            focus: PaneFocus::Listing,
            listing_cursor: 0,
            prose_cursor: 0,
            hovered_prose: None,
        }
    }
}

impl ViewerState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn focus(&self) -> PaneFocus {
        self.focus
    }

    pub fn listing_cursor(&self) -> usize {
        self.listing_cursor
    }

    pub fn prose_cursor(&self) -> usize {
        self.prose_cursor
    }

    pub fn hovered_prose(&self) -> Option<ElementId> {
        self.hovered_prose
    }

    pub fn set_focus(&mut self, focus: PaneFocus) {
        if self.focus == focus {
            return;
        }
        self.focus = focus;
        self.bump();
    }

    pub fn set_listing_cursor(&mut self, cursor: usize) {
        if self.listing_cursor == cursor {
            return;
        }
        self.listing_cursor = cursor;
        self.bump();
    }

    pub fn set_prose_cursor(&mut self, cursor: usize) {
        if self.prose_cursor == cursor {
            return;
        }
        self.prose_cursor = cursor;
        self.bump();
    }

    pub fn set_hovered_prose(&mut self, hovered: Option<ElementId>) {
        if self.hovered_prose == hovered {
            return;
        }
        self.hovered_prose = hovered;
        self.bump();
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
