//! XML loading of the declarative element dialect.
//!
//! Tag names resolve through the explicit [`Registry`]; attributes map to
//! element properties first (per-element name lookup) and style properties
//! second (the property name table, `-property` suffix accepted); `class`
//! and `id` populate the element info; child elements and text content
//! become child nodes or element text.
//!
//! Unknown tags and unparseable attribute values are hard failures naming
//! the offender — documents are configuration, and broken configuration
//! does not degrade silently.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::{Element, ElementFactory, Registry};
use crate::error::DomError;
use crate::style::{PropertyKind, StyleProperty};

/// One element under construction while its subtree is read.
struct Pending {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Box<dyn Element>>,
}

/// Load a document from a string. Returns the root element.
pub fn load_str(xml: &str, registry: &Registry) -> Result<Box<dyn Element>, DomError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Pending> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(begin(&start)?);
            }
            Event::Empty(start) => {
                let pending = begin(&start)?;
                let element = finish(pending, registry)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(pending) = stack.last_mut() {
                    pending.text.push_str(&text.unescape()?);
                }
            }
            Event::End(_) => {
                let pending = stack.pop().ok_or(DomError::NoRoot)?;
                let element = finish(pending, registry)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Eof => return Err(DomError::NoRoot),
            _ => {}
        }
    }
}

/// Read the tag name and attributes off an opening tag.
fn begin(start: &BytesStart<'_>) -> Result<Pending, DomError> {
    let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((name, value));
    }

    Ok(Pending {
        tag,
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Construct the element once its subtree is complete.
fn finish(pending: Pending, registry: &Registry) -> Result<Box<dyn Element>, DomError> {
    let Pending {
        tag,
        attrs,
        text,
        children,
    } = pending;

    let factory: &ElementFactory = registry.get(&tag)?;
    let trimmed = text.trim();
    let text_content = (!trimmed.is_empty()).then_some(trimmed);
    let consumed_by_ctor = factory.from_text.is_some() && text_content.is_some();

    let mut element = factory.construct(&tag, text_content)?;

    for (name, value) in &attrs {
        apply_attribute(element.as_mut(), &tag, name, value)?;
    }

    if !children.is_empty() && !element.adopt_children(children) {
        return Err(DomError::NoConstructor(tag));
    }

    if !consumed_by_ctor {
        if let Some(t) = text_content {
            // Elements with no use for text ignore it.
            let _ = element.set_text(t);
        }
    }

    Ok(element)
}

fn apply_attribute(
    element: &mut dyn Element,
    tag: &str,
    name: &str,
    value: &str,
) -> Result<(), DomError> {
    if name.eq_ignore_ascii_case("class") {
        for class in value.split_whitespace() {
            element.info_mut().add_class(class);
        }
        return Ok(());
    }
    if name.eq_ignore_ascii_case("id") {
        element.info_mut().set_id(value);
        return Ok(());
    }

    // Element property first, style property second.
    if element.set_attribute(name, value) {
        return Ok(());
    }

    let kind = PropertyKind::from_name(name).map_err(|source| DomError::BadAttribute {
        tag: tag.to_string(),
        name: name.to_string(),
        source,
    })?;
    let prop = StyleProperty::parse(kind, value).map_err(|source| DomError::BadAttribute {
        tag: tag.to_string(),
        name: name.to_string(),
        source,
    })?;
    element.style_mut().set(prop);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Display};

    fn load(xml: &str) -> Result<Box<dyn Element>, DomError> {
        load_str(xml, &Registry::with_defaults())
    }

    #[test]
    fn loads_a_nested_document() {
        let root = load(
            r#"<div display="flex">
                 <p>first paragraph</p>
                 <p>second</p>
               </div>"#,
        )
        .unwrap();

        assert_eq!(root.tag(), "div");
        assert_eq!(root.style().display(), Display::Flex);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].tag(), "p");
    }

    #[test]
    fn unknown_tag_names_the_tag() {
        let err = load("<blink>no</blink>").err().unwrap();
        assert!(matches!(err, DomError::UnknownTag(t) if t == "blink"));
    }

    #[test]
    fn style_attributes_land_in_the_style_block() {
        let root = load(r##"<p color="red" background-color="#000000">x</p>"##).unwrap();
        assert_eq!(root.style().color(), Color::RED);
        assert_eq!(root.style().background_color(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn property_suffix_fallback_applies() {
        let root = load(r#"<p padding-property="2">x</p>"#).unwrap();
        assert!(root.style().contains(PropertyKind::Padding));
    }

    #[test]
    fn class_and_id_populate_element_info() {
        let root = load(r#"<div class="a b" id="root"/>"#).unwrap();
        assert!(root.info().has_class("a"));
        assert!(root.info().has_class("b"));
        assert_eq!(root.info().id(), Some("root"));
    }

    #[test]
    fn bad_attribute_value_is_a_hard_failure() {
        let err = load(r#"<p color="not-a-color">x</p>"#).err().unwrap();
        assert!(matches!(err, DomError::BadAttribute { name, .. } if name == "color"));
    }

    #[test]
    fn unknown_attribute_is_a_hard_failure() {
        let err = load(r#"<p corner-radius="3">x</p>"#).err().unwrap();
        assert!(matches!(err, DomError::BadAttribute { .. }));
    }

    #[test]
    fn element_attribute_beats_style_lookup() {
        let root = load(r#"<checkbox label="agree"/>"#).unwrap();
        assert_eq!(root.tag(), "checkbox");
    }

    #[test]
    fn text_content_reaches_text_elements() {
        let root = load("<p>hello there</p>").unwrap();
        assert_eq!(root.width_for(1), "hello there".len() as i32);
    }

    #[test]
    fn empty_document_has_no_root() {
        assert!(matches!(load(""), Err(DomError::NoRoot)));
    }
}
