//! Selector-based stylesheets.
//!
//! A stylesheet is an ordered list of `selector -> style block` rules.
//! Applying it walks the tree and folds every matching rule over each
//! element in rule order, so later rules override earlier ones property by
//! property — the same cascade contract as [`StyleBlock::override_with`].

use crate::element::Element;
use crate::style::StyleBlock;

/// What a rule matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches the element tag (`p`, `div`).
    Tag(String),
    /// Matches a class (`.warning`).
    Class(String),
    /// Matches the element id (`#header`).
    Id(String),
}

impl Selector {
    /// Parse the `tag` / `.class` / `#id` notation.
    pub fn parse(s: &str) -> Selector {
        let t = s.trim();
        if let Some(class) = t.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else if let Some(id) = t.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else {
            Selector::Tag(t.to_ascii_lowercase())
        }
    }

    pub fn matches(&self, element: &dyn Element) -> bool {
        match self {
            Selector::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            Selector::Class(class) => element.info().has_class(class),
            Selector::Id(id) => element.info().id() == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    selector: Selector,
    block: StyleBlock,
}

/// An ordered rule list applied over an element tree.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; later rules win the cascade.
    pub fn add(&mut self, selector: &str, block: StyleBlock) {
        self.rules.push(Rule {
            selector: Selector::parse(selector),
            block,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every matching rule to `element` and its subtree.
    pub fn apply(&self, element: &mut dyn Element) {
        let mut merged = StyleBlock::new();
        let mut any = false;
        for rule in &self.rules {
            if rule.selector.matches(element) {
                merged.override_with(&rule.block);
                any = true;
            }
        }
        if any {
            element.apply_styles(&merged);
        }

        for child in element.children_mut() {
            self.apply(child.as_mut());
        }
    }
}
