// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer-event dispatch and URL-parameter intake.
//!
//! One delegated enter/leave pair per page feeds both highlight sessions. An event's element is
//! resolved upward to the nearest ancestor carrying a domain's complete marker-attribute set;
//! elements with no qualifying ancestor are ignored. Every malformed input on this path degrades
//! to "no highlight", never to an error.

use std::collections::BTreeMap;

use crate::codec;
use crate::highlight::{LineHighlightSession, RefHighlightSession};
use crate::model::{BlockId, LineTarget, RefName};
use crate::page::{
    ElementId, Page, ATTR_HL, ATTR_HLLINES, ATTR_PREVIEW_ANCHOR, ATTR_PSEUDOCODE, ATTR_REF,
};

pub const PARAM_HL_LINES: &str = "hlLines";
pub const PARAM_HL_PSEUDOCODE: &str = "hlPseudocode";
pub const PARAM_DEF: &str = "def";

/// Parsed URL query parameters. Supports the subset of `URLSearchParams` the viewer relies on:
/// `&`-separated `key=value` pairs, `+` and `%XX` form decoding, last occurrence of a key wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = BTreeMap::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = form_decode(key);
            if key.is_empty() {
                continue;
            }
            params.insert(key, form_decode(value));
        }
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Percent- and plus-decodes one query component. Invalid escapes are kept verbatim and invalid
/// UTF-8 is replaced, so no input can make parsing fail.
fn form_decode(raw: &str) -> String {
    let mut bytes = Vec::with_capacity(raw.len());
    let raw = raw.as_bytes();
    let mut index = 0;
    while index < raw.len() {
        match raw[index] {
            b'+' => {
                bytes.push(b' ');
                index += 1;
            }
            b'%' => match hex_pair(raw.get(index + 1).copied(), raw.get(index + 2).copied()) {
                Some(byte) => {
                    bytes.push(byte);
                    index += 3;
                }
                None => {
                    bytes.push(b'%');
                    index += 1;
                }
            },
            byte => {
                bytes.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_pair(high: Option<u8>, low: Option<u8>) -> Option<u8> {
    let high = (high? as char).to_digit(16)?;
    let low = (low? as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

/// Owns both highlight sessions and routes pointer traffic into them.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    lines: LineHighlightSession,
    refs: RefHighlightSession,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            lines: LineHighlightSession::new(),
            refs: RefHighlightSession::new(),
        }
    }

    /// Reads the default targets from the query parameters, once, at load.
    pub fn from_query(params: &QueryParams) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.lines.set_default(line_default(params));
        dispatcher.refs.set_default(ref_default(params));
        dispatcher
    }

    pub fn line_session(&self) -> &LineHighlightSession {
        &self.lines
    }

    pub fn ref_session(&self) -> &RefHighlightSession {
        &self.refs
    }

    /// Delegated pointer-enter: resolves each domain's anchor from `target` upward and hands the
    /// resolved target to that domain's session. One element may anchor both domains.
    pub fn pointer_enter(&mut self, page: &Page, target: ElementId) {
        if let Some((anchor, target)) = resolve_line_anchor(page, target) {
            self.lines.enter_hover(anchor, target);
        }
        if let Some((anchor, name)) = resolve_ref_anchor(page, target) {
            self.refs.enter_hover(anchor, name);
        }
    }

    /// Delegated pointer-leave for the element the pointer left. Sessions ignore leaves of
    /// elements they do not consider hovered.
    pub fn pointer_leave(&mut self, page: &Page, target: ElementId) {
        if let Some(anchor) = find_anchor(page, target, &LINE_MARKERS) {
            self.lines.exit_hover(anchor);
        }
        if let Some(anchor) = find_anchor(page, target, &REF_MARKERS) {
            self.refs.exit_hover(anchor);
        }
    }
}

const LINE_MARKERS: [&str; 4] = [ATTR_REF, ATTR_PREVIEW_ANCHOR, ATTR_PSEUDOCODE, ATTR_HLLINES];
const REF_MARKERS: [&str; 3] = [ATTR_REF, ATTR_PREVIEW_ANCHOR, ATTR_HL];

fn find_anchor(page: &Page, from: ElementId, markers: &[&str]) -> Option<ElementId> {
    page.ancestors_inclusive(from)
        .find(|&element| markers.iter().all(|marker| page.element(element).has_attr(marker)))
}

fn resolve_line_anchor(page: &Page, from: ElementId) -> Option<(ElementId, LineTarget)> {
    let anchor = find_anchor(page, from, &LINE_MARKERS)?;
    let element = page.element(anchor);
    let block = BlockId::new(element.attr(ATTR_PSEUDOCODE)?).ok()?;
    let lines = codec::decode(element.attr(ATTR_HLLINES));
    Some((anchor, LineTarget::new(block, lines)))
}

fn resolve_ref_anchor(page: &Page, from: ElementId) -> Option<(ElementId, RefName)> {
    let anchor = find_anchor(page, from, &REF_MARKERS)?;
    let name = RefName::new(page.element(anchor).attr(ATTR_REF)?).ok()?;
    Some((anchor, name))
}

fn line_default(params: &QueryParams) -> Option<LineTarget> {
    let encoded = params.get(PARAM_HL_LINES)?;
    let block = BlockId::new(params.get(PARAM_HL_PSEUDOCODE)?).ok()?;
    Some(LineTarget::new(block, codec::decode(Some(encoded))))
}

fn ref_default(params: &QueryParams) -> Option<RefName> {
    RefName::new(params.get(PARAM_DEF)?).ok()
}
