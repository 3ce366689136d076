// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Pure layout/input helpers used by TUI rendering.
fn step(cursor: usize, delta: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let max = (len - 1) as i64;
    (cursor as i64 + delta).clamp(0, max) as usize
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Keeps the cursor line inside the scrolled window, moving the window as little as possible.
fn scroll_to_cursor(scroll: usize, cursor_line: usize, height: usize) -> usize {
    if height == 0 {
        return scroll;
    }
    if cursor_line < scroll {
        cursor_line
    } else if cursor_line >= scroll + height {
        cursor_line + 1 - height
    } else {
        scroll
    }
}

/// Fold markers appear while the gutter is hovered, while the region is folded (so the collapsed
/// state stays discoverable), and under the cursor for keyboard users.
fn marker_visible(gutter_hovered: bool, folded: bool, at_cursor: bool) -> bool {
    gutter_hovered || folded || at_cursor
}

fn indent_padding(indent: u32) -> String {
    "  ".repeat(indent as usize)
}

fn footer_help_line(base: Style) -> Line<'static> {
    let key = base.fg(Color::Cyan);
    let label = base.fg(Color::Gray);
    Line::from(vec![
        Span::styled(" Tab", key),
        Span::styled(" panes  ", label),
        Span::styled("↑↓/jk", key),
        Span::styled(" move  ", label),
        Span::styled("⏎/space", key),
        Span::styled(" fold  ", label),
        Span::styled("hover", key),
        Span::styled(" highlight  ", label),
        Span::styled("q", key),
        Span::styled(" quit", label),
    ])
}

fn callout_label(callout: &Callout) -> String {
    format!("→ {}  [{} {}]", callout.text(), callout.block(), callout.lines_encoded())
}

fn definition_label(definition: &Definition) -> String {
    format!("≔ {} — {}", definition.term(), definition.body())
}

fn mention_label(mention: &Mention) -> String {
    format!("• {}", mention.text())
}
