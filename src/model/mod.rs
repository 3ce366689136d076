// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Articles contain pseudocode blocks (ordered rows with indent levels) plus the prose callouts,
//! definitions and mentions that act as highlight anchors.

pub mod article;
pub mod block;
pub mod ids;
pub mod target;

pub use article::{Article, Callout, Definition, Mention};
pub use block::{Block, BlockError, Row};
pub use ids::{BlockId, Id, IdError, RefName};
pub use target::{line_element_id, LineTarget};
