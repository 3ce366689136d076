// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stylesheet-backed highlighting.
//!
//! Two sessions share one protocol: a default target read from the URL once, a transient hovered
//! target, and exactly one of them active at a time. Rendering is deliberately crude: every
//! change clears the session's stylesheet and reinserts the fixed rule set for the active target.

use std::fmt;

use smol_str::SmolStr;

use crate::model::{line_element_id, LineTarget, RefName};
use crate::page::{ElementId, Page, ATTR_HL, ATTR_REF};

/// Highlight intensity. `Strong` marks the lines/defining occurrence, `Soft` mere references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Shade {
    Soft,
    Strong,
}

impl Shade {
    pub fn css(self) -> &'static str {
        match self {
            Self::Soft => "background: rgba(255, 228, 0, 0.1);",
            Self::Strong => "background: rgba(255, 228, 0, 0.309);",
        }
    }
}

/// The closed set of selector forms the sessions emit.
///
/// `Display` produces the CSS text; [`Selector::matches`] lets a surface apply the rules against
/// the element arena without a CSS engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#{id}`: the element carrying the synthesized id (a line gutter or defining container).
    Id(SmolStr),
    /// `#{id}+*`: the next sibling; continues a line highlight from the gutter onto the line.
    IdAdjacent(SmolStr),
    /// `[data-ref={name}][data-hl]`: every highlight-eligible occurrence of the reference.
    RefMarked(RefName),
    /// `#{name} > [data-ref={name}][data-hl]`: occurrences inside the defining container.
    RefInDefiningContainer(RefName),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::IdAdjacent(id) => write!(f, "#{id}+*"),
            Self::RefMarked(name) => write!(f, "[data-ref={name}][data-hl]"),
            Self::RefInDefiningContainer(name) => {
                write!(f, "#{name} > [data-ref={name}][data-hl]")
            }
        }
    }
}

impl Selector {
    pub fn matches(&self, page: &Page, element: ElementId) -> bool {
        match self {
            Self::Id(id) => page.element(element).html_id() == Some(id.as_str()),
            Self::IdAdjacent(id) => page
                .prev_sibling(element)
                .is_some_and(|sibling| page.element(sibling).html_id() == Some(id.as_str())),
            Self::RefMarked(name) => ref_marked(page, element, name),
            Self::RefInDefiningContainer(name) => {
                ref_marked(page, element, name)
                    && page.element(element).parent().is_some_and(|parent| {
                        page.element(parent).html_id() == Some(name.as_str())
                    })
            }
        }
    }
}

fn ref_marked(page: &Page, element: ElementId, name: &RefName) -> bool {
    let element = page.element(element);
    element.attr(ATTR_REF) == Some(name.as_str()) && element.has_attr(ATTR_HL)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    selector: Selector,
    shade: Shade,
}

impl Rule {
    pub fn new(selector: Selector, shade: Shade) -> Self {
        Self { selector, shade }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn shade(&self) -> Shade {
        self.shade
    }

    pub fn css_text(&self) -> String {
        format!("{} {{ {} }}", self.selector, self.shade.css())
    }
}

/// The page-scoped stylesheet of one highlighting domain. Owned by its session; nothing else
/// writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    fn insert_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    fn clear(&mut self) {
        self.rules.clear();
    }

    /// Strongest shade any rule applies to `element`, if one matches.
    pub fn shade_for(&self, page: &Page, element: ElementId) -> Option<Shade> {
        self.rules
            .iter()
            .filter(|rule| rule.selector.matches(page, element))
            .map(Rule::shade)
            .max()
    }
}

/// A highlighting domain: what a target is and which rules render it.
pub trait HighlightDomain {
    type Target: fmt::Debug + Clone + PartialEq;

    fn rules(target: &Self::Target) -> Vec<Rule>;
}

/// Pseudocode lines, targeted as `{blockId}L{lineNo}` gutter ids plus their line siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDomain {}

impl HighlightDomain for LineDomain {
    type Target = LineTarget;

    fn rules(target: &Self::Target) -> Vec<Rule> {
        let mut rules = Vec::with_capacity(target.lines().len() * 2);
        for &line in target.lines() {
            let id = line_element_id(target.block(), line);
            rules.push(Rule::new(Selector::Id(id.clone()), Shade::Strong));
            rules.push(Rule::new(Selector::IdAdjacent(id), Shade::Strong));
        }
        rules
    }
}

/// Cross-reference names; the defining container's occurrences get the stronger shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefDomain {}

impl HighlightDomain for RefDomain {
    type Target = RefName;

    fn rules(target: &Self::Target) -> Vec<Rule> {
        vec![
            Rule::new(Selector::RefMarked(target.clone()), Shade::Soft),
            Rule::new(Selector::RefInDefiningContainer(target.clone()), Shade::Strong),
        ]
    }
}

/// Default/hover state machine of one domain.
///
/// The hovered element is tracked here so leave notifications are delegated the same way enter
/// notifications are: leaving an element that is not the hovered one changes nothing, which makes
/// duplicate or stale leave events harmless.
#[derive(Debug, Clone)]
pub struct HighlightSession<D: HighlightDomain> {
    stylesheet: Stylesheet,
    default_target: Option<D::Target>,
    hovered: Option<(ElementId, D::Target)>,
}

impl<D: HighlightDomain> Default for HighlightSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HighlightDomain> HighlightSession<D> {
    pub fn new() -> Self {
        Self {
            stylesheet: Stylesheet::default(),
            default_target: None,
            hovered: None,
        }
    }

    /// Installs the URL-derived default. Called once at load, before any hover traffic.
    pub fn set_default(&mut self, target: Option<D::Target>) {
        self.default_target = target;
        self.rerender();
    }

    pub fn default_target(&self) -> Option<&D::Target> {
        self.default_target.as_ref()
    }

    /// The hovered target wins over the default while present.
    pub fn active_target(&self) -> Option<&D::Target> {
        self.hovered.as_ref().map(|(_, target)| target).or(self.default_target.as_ref())
    }

    pub fn hovered_element(&self) -> Option<ElementId> {
        self.hovered.as_ref().map(|&(element, _)| element)
    }

    pub fn enter_hover(&mut self, element: ElementId, target: D::Target) {
        self.hovered = Some((element, target));
        self.rerender();
    }

    /// Restores the default if `element` is the hovered one; otherwise a no-op.
    pub fn exit_hover(&mut self, element: ElementId) {
        if self.hovered_element() != Some(element) {
            return;
        }
        self.hovered = None;
        self.rerender();
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    fn rerender(&mut self) {
        self.stylesheet.clear();
        let Some(target) = self.active_target().cloned() else {
            return;
        };
        for rule in D::rules(&target) {
            self.stylesheet.insert_rule(rule);
        }
    }
}

pub type LineHighlightSession = HighlightSession<LineDomain>;
pub type RefHighlightSession = HighlightSession<RefDomain>;

#[cfg(test)]
mod tests;
