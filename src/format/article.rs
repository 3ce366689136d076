// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON article manifests.
//!
//! A manifest captures what the document generator would have emitted as HTML: pseudocode blocks
//! and the prose anchors around them. Parsing is strict: the producing side has no business
//! emitting dangling block references or duplicate ids; hover-time leniency lives elsewhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{
    Article, Block, BlockId, Callout, Definition, IdError, Mention, RefName, Row,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArticleDoc {
    title: String,
    #[serde(default)]
    blocks: Vec<BlockDoc>,
    #[serde(default)]
    callouts: Vec<CalloutDoc>,
    #[serde(default)]
    definitions: Vec<DefinitionDoc>,
    #[serde(default)]
    mentions: Vec<MentionDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockDoc {
    id: String,
    rows: Vec<RowDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RowDoc {
    line: u32,
    indent: u32,
    text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalloutDoc {
    text: String,
    block: String,
    lines: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefinitionDoc {
    name: String,
    term: String,
    body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MentionDoc {
    name: String,
    text: String,
}

pub fn parse_article(source: &str) -> Result<Article, ArticleParseError> {
    let doc: ArticleDoc = serde_json::from_str(source).map_err(ArticleParseError::Json)?;

    let mut blocks = Vec::with_capacity(doc.blocks.len());
    for block_doc in doc.blocks {
        let block_id = BlockId::new(block_doc.id.clone()).map_err(|reason| {
            ArticleParseError::InvalidId { raw: block_doc.id.clone(), reason }
        })?;
        if blocks.iter().any(|existing: &Block| *existing.block_id() == block_id) {
            return Err(ArticleParseError::DuplicateBlock { block_id });
        }
        let rows = block_doc
            .rows
            .into_iter()
            .map(|row| Row::new(row.line, row.indent, row.text))
            .collect();
        let block = Block::new(block_id.clone(), rows)
            .map_err(|_| ArticleParseError::DuplicateLine { block_id })?;
        blocks.push(block);
    }

    let mut callouts = Vec::with_capacity(doc.callouts.len());
    for callout in doc.callouts {
        let block_id = BlockId::new(callout.block.clone()).map_err(|reason| {
            ArticleParseError::InvalidId { raw: callout.block.clone(), reason }
        })?;
        if !blocks.iter().any(|block| *block.block_id() == block_id) {
            return Err(ArticleParseError::UnknownCalloutBlock { block_id });
        }
        callouts.push(Callout::new(callout.text, block_id, callout.lines));
    }

    let mut definitions = Vec::with_capacity(doc.definitions.len());
    for definition in doc.definitions {
        let name = RefName::new(definition.name.clone()).map_err(|reason| {
            ArticleParseError::InvalidId { raw: definition.name.clone(), reason }
        })?;
        if definitions.iter().any(|existing: &Definition| *existing.name() == name) {
            return Err(ArticleParseError::DuplicateDefinition { name });
        }
        definitions.push(Definition::new(name, definition.term, definition.body));
    }

    let mut mentions = Vec::with_capacity(doc.mentions.len());
    for mention in doc.mentions {
        let name = RefName::new(mention.name.clone()).map_err(|reason| {
            ArticleParseError::InvalidId { raw: mention.name.clone(), reason }
        })?;
        mentions.push(Mention::new(name, mention.text));
    }

    Ok(Article::new(doc.title, blocks, callouts, definitions, mentions))
}

pub fn export_article(article: &Article) -> Result<String, ArticleExportError> {
    let doc = ArticleDoc {
        title: article.title().to_owned(),
        blocks: article
            .blocks()
            .iter()
            .map(|block| BlockDoc {
                id: block.block_id().to_string(),
                rows: block
                    .rows()
                    .iter()
                    .map(|row| RowDoc {
                        line: row.line_no(),
                        indent: row.indent(),
                        text: row.text().to_owned(),
                    })
                    .collect(),
            })
            .collect(),
        callouts: article
            .callouts()
            .iter()
            .map(|callout| CalloutDoc {
                text: callout.text().to_owned(),
                block: callout.block().to_string(),
                lines: callout.lines_encoded().to_owned(),
            })
            .collect(),
        definitions: article
            .definitions()
            .iter()
            .map(|definition| DefinitionDoc {
                name: definition.name().to_string(),
                term: definition.term().to_owned(),
                body: definition.body().to_owned(),
            })
            .collect(),
        mentions: article
            .mentions()
            .iter()
            .map(|mention| MentionDoc {
                name: mention.name().to_string(),
                text: mention.text().to_owned(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&doc).map_err(ArticleExportError::Json)
}

#[derive(Debug)]
pub enum ArticleParseError {
    Json(serde_json::Error),
    InvalidId { raw: String, reason: IdError },
    DuplicateBlock { block_id: BlockId },
    DuplicateLine { block_id: BlockId },
    UnknownCalloutBlock { block_id: BlockId },
    DuplicateDefinition { name: RefName },
}

impl fmt::Display for ArticleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid article JSON: {err}"),
            Self::InvalidId { raw, reason } => write!(f, "invalid id '{raw}': {reason}"),
            Self::DuplicateBlock { block_id } => write!(f, "duplicate block id '{block_id}'"),
            Self::DuplicateLine { block_id } => {
                write!(f, "duplicate line number in block '{block_id}'")
            }
            Self::UnknownCalloutBlock { block_id } => {
                write!(f, "callout references unknown block '{block_id}'")
            }
            Self::DuplicateDefinition { name } => write!(f, "duplicate definition '{name}'"),
        }
    }
}

impl std::error::Error for ArticleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ArticleExportError {
    Json(serde_json::Error),
}

impl fmt::Display for ArticleExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "article serialization failed: {err}"),
        }
    }
}

impl std::error::Error for ArticleExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}
