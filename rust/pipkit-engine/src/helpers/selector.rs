//! The compound-selector subset the site adapters use: a tag name followed
//! by any number of `#id`, `.class` and `[attr]` / `[attr='value']` parts.
//! Combinators are not supported.

use super::FakeElement;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    pub(crate) fn parse(source: &str) -> Option<Self> {
        let mut selector = Selector::default();
        let mut rest = source.trim();

        let tag = take_ident(&mut rest);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            match marker {
                '#' => selector.id = Some(non_empty(take_ident(&mut rest))?),
                '.' => selector.classes.push(non_empty(take_ident(&mut rest))?),
                '[' => {
                    let (attribute, tail) = parse_attribute(rest)?;
                    selector.attributes.push(attribute);
                    rest = tail;
                }
                _ => return None,
            }
        }

        if selector == Selector::default() {
            return None;
        }
        Some(selector)
    }

    pub(crate) fn matches(&self, element: &FakeElement) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id().as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, expected)| match (element.attribute(name), expected) {
                (Some(actual), Some(expected)) => &actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}

fn take_ident<'a>(rest: &mut &'a str) -> &'a str {
    let current: &'a str = *rest;
    let end = current
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(current.len());
    let (ident, tail) = current.split_at(end);
    *rest = tail;
    ident
}

fn non_empty(ident: &str) -> Option<String> {
    (!ident.is_empty()).then(|| ident.to_string())
}

fn parse_attribute(source: &str) -> Option<((String, Option<String>), &str)> {
    let close = source.find(']')?;
    let (body, tail) = (&source[..close], &source[close + 1..]);

    let attribute = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .unwrap_or(value);
            (non_empty(name.trim())?, Some(unquoted.to_string()))
        }
        None => (non_empty(body.trim())?, None),
    };

    Some((attribute, tail))
}
