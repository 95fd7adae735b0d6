//! Explicit element registration table.
//!
//! Maps tag names to factories, populated by explicit calls at startup —
//! the pluggable vocabulary for XML loading without any runtime type
//! scanning. A factory offers up to three construction modes; the loader
//! picks one by a fixed priority (text, then parameterless, then
//! with-children) depending on the document content.

use std::collections::HashMap;

use crate::error::DomError;

use super::{
    BoolArgument, Checkbox, Div, Element, ListView, Paragraph, StringArgument, Text, TextInput,
};

type TextCtor = fn(&str) -> Box<dyn Element>;
type EmptyCtor = fn() -> Box<dyn Element>;
type ChildrenCtor = fn(Vec<Box<dyn Element>>) -> Box<dyn Element>;

/// Construction modes one element type offers.
#[derive(Default, Clone, Copy)]
pub struct ElementFactory {
    pub from_text: Option<TextCtor>,
    pub empty: Option<EmptyCtor>,
    pub with_children: Option<ChildrenCtor>,
}

impl ElementFactory {
    pub fn text(ctor: TextCtor) -> Self {
        Self {
            from_text: Some(ctor),
            ..Self::default()
        }
    }

    pub fn empty(ctor: EmptyCtor) -> Self {
        Self {
            empty: Some(ctor),
            ..Self::default()
        }
    }

    pub fn children(ctor: ChildrenCtor) -> Self {
        Self {
            with_children: Some(ctor),
            ..Self::default()
        }
    }

    pub fn and_text(mut self, ctor: TextCtor) -> Self {
        self.from_text = Some(ctor);
        self
    }

    pub fn and_empty(mut self, ctor: EmptyCtor) -> Self {
        self.empty = Some(ctor);
        self
    }

    pub fn and_children(mut self, ctor: ChildrenCtor) -> Self {
        self.with_children = Some(ctor);
        self
    }

    /// Build an element for the given document content.
    ///
    /// Priority: the text constructor when text content is present, else
    /// the parameterless constructor, else the children-array constructor.
    pub fn construct(&self, tag: &str, text: Option<&str>) -> Result<Box<dyn Element>, DomError> {
        if let (Some(text), Some(ctor)) = (text, self.from_text) {
            return Ok(ctor(text));
        }
        if let Some(ctor) = self.empty {
            return Ok(ctor());
        }
        if let Some(ctor) = self.with_children {
            return Ok(ctor(Vec::new()));
        }
        Err(DomError::NoConstructor(tag.to_string()))
    }
}

/// Tag-name to factory table.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, ElementFactory>,
}

impl Registry {
    /// An empty registry; register every tag explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in element vocabulary.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: &[(&str, ElementFactory)] = &[
            (
                "div",
                ElementFactory::empty(|| Box::new(Div::new()))
                    .and_children(|c| Box::new(Div::with_children(c))),
            ),
            (
                "p",
                ElementFactory::text(|t| Box::new(Paragraph::new(t)))
                    .and_empty(|| Box::new(Paragraph::new(""))),
            ),
            (
                "text",
                ElementFactory::text(|t| Box::new(Text::new(t)))
                    .and_empty(|| Box::new(Text::new(""))),
            ),
            (
                "ul",
                ElementFactory::empty(|| Box::new(ListView::new()))
                    .and_children(|c| Box::new(ListView::with_children(c))),
            ),
            (
                "checkbox",
                ElementFactory::text(|t| {
                    Box::new(Checkbox::new(t, Box::new(BoolArgument::new(false))))
                })
                .and_empty(|| Box::new(Checkbox::new("", Box::new(BoolArgument::new(false))))),
            ),
            (
                "input",
                ElementFactory::empty(|| Box::new(TextInput::new(Box::new(StringArgument::new(""))))),
            ),
        ];
        for (tag, factory) in defaults {
            // Fresh table, distinct literals: registration cannot collide.
            registry
                .register(tag, *factory)
                .unwrap_or_else(|_| unreachable!("duplicate default tag"));
        }
        registry
    }

    /// Register a tag. Registering a name twice is a configuration error.
    pub fn register(&mut self, tag: &str, factory: ElementFactory) -> Result<(), DomError> {
        let key = tag.to_ascii_lowercase();
        if self.factories.contains_key(&key) {
            return Err(DomError::DuplicateTag(tag.to_string()));
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Look a tag up; unknown tags are a hard failure naming the tag.
    pub fn get(&self, tag: &str) -> Result<&ElementFactory, DomError> {
        self.factories
            .get(&tag.to_ascii_lowercase())
            .ok_or_else(|| DomError::UnknownTag(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_is_a_hard_failure() {
        let registry = Registry::with_defaults();
        let err = registry.get("marquee").err().unwrap();
        assert!(matches!(err, DomError::UnknownTag(t) if t == "marquee"));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::with_defaults();
        let err = registry
            .register("div", ElementFactory::empty(|| Box::new(Div::new())))
            .unwrap_err();
        assert!(matches!(err, DomError::DuplicateTag(_)));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = Registry::with_defaults();
        assert!(registry.get("DIV").is_ok());
    }

    #[test]
    fn construction_priority_prefers_text_when_present() {
        let registry = Registry::with_defaults();
        let p = registry.get("p").unwrap().construct("p", Some("hi")).unwrap();
        assert_eq!(p.tag(), "p");

        // No text: the parameterless constructor is next in line.
        let p = registry.get("p").unwrap().construct("p", None).unwrap();
        assert_eq!(p.tag(), "p");
    }

    #[test]
    fn factory_without_any_constructor_fails() {
        let factory = ElementFactory::default();
        assert!(matches!(
            factory.construct("x", None),
            Err(DomError::NoConstructor(_))
        ));
    }
}
