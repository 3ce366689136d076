// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Article content model: pseudocode blocks plus the prose anchors that reference them.
//!
//! An article is what the (out-of-scope) document generator would have emitted as HTML; here it is
//! the input the viewer mounts into a [`crate::page::Page`].

use super::block::Block;
use super::ids::{BlockId, RefName};

/// A prose span that references a set of lines in a pseudocode block.
///
/// Carries the encoded range string verbatim; decoding happens on the consuming side and is
/// fail-soft there, so a bad encoding degrades to "no lines highlighted" at hover time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    text: String,
    block: BlockId,
    lines_encoded: String,
}

impl Callout {
    pub fn new(text: impl Into<String>, block: BlockId, lines_encoded: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            block,
            lines_encoded: lines_encoded.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn block(&self) -> &BlockId {
        &self.block
    }

    pub fn lines_encoded(&self) -> &str {
        &self.lines_encoded
    }
}

/// The defining occurrence of a term: a container whose id is the reference name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    name: RefName,
    term: String,
    body: String,
}

impl Definition {
    pub fn new(name: RefName, term: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name,
            term: term.into(),
            body: body.into(),
        }
    }

    pub fn name(&self) -> &RefName {
        &self.name
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A referencing occurrence of a defined term somewhere in prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    name: RefName,
    text: String,
}

impl Mention {
    pub fn new(name: RefName, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }

    pub fn name(&self) -> &RefName {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One loaded article: blocks and the prose anchors around them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Article {
    title: String,
    blocks: Vec<Block>,
    callouts: Vec<Callout>,
    definitions: Vec<Definition>,
    mentions: Vec<Mention>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        blocks: Vec<Block>,
        callouts: Vec<Callout>,
        definitions: Vec<Definition>,
        mentions: Vec<Mention>,
    ) -> Self {
        Self {
            title: title.into(),
            blocks,
            callouts,
            definitions,
            mentions,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, block_id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.block_id() == block_id)
    }

    pub fn callouts(&self) -> &[Callout] {
        &self.callouts
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }
}
