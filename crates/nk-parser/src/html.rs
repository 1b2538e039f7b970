//! Minimal markup region helpers: find elements by class, take their text.
//!
//! This is not a general HTML parser. It tracks open/close tags of the same
//! name to find where an element ends, which is enough for result pages.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*?)(/?)>")
        .expect("valid tag pattern")
});
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid class pattern")
});
static HREF_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid href pattern")
});
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br pattern"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity pattern"));

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// An element located in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub tag: String,
    pub attrs: &'a str,
    /// Markup between the start and end tags.
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    /// Decoded text content, keeping source line breaks.
    pub fn text(&self) -> String {
        text_content(self.inner)
    }

    pub fn has_class(&self, class: &str) -> bool {
        class_list_contains(self.attrs, class)
    }

    pub fn attr_href(&self) -> Option<String> {
        attr_value(&HREF_ATTR, self.attrs).map(|v| decode_entities(&v))
    }

    /// First descendant with the given tag name.
    pub fn first_child(&self, tag: &str) -> Option<Element<'a>> {
        collect(self.inner, |t, _| t.eq_ignore_ascii_case(tag)).into_iter().next()
    }
}

fn class_list_contains(attrs: &str, class: &str) -> bool {
    attr_value(&CLASS_ATTR, attrs)
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

fn attr_value(re: &Regex, attrs: &str) -> Option<String> {
    re.captures(attrs).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .or_else(|| c.get(3))
            .map(|m| m.as_str().to_string())
    })
}

fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Every element in document order, nested ones included.
pub fn elements(html: &str) -> Vec<Element<'_>> {
    collect(html, |_, _| true)
}

/// Elements whose (tag, attrs) pass `keep`. End tags are only located for kept ones.
fn collect<'a>(html: &'a str, keep: impl Fn(&str, &str) -> bool) -> Vec<Element<'a>> {
    let mut found = Vec::new();
    for cap in ANY_TAG.captures_iter(html) {
        if &cap[1] == "/" {
            continue;
        }
        let (Some(whole), Some(attrs)) = (cap.get(0), cap.get(3)) else {
            continue;
        };
        let tag = &cap[2];
        if !keep(tag, attrs.as_str()) {
            continue;
        }
        let inner = if &cap[4] == "/" || is_void(tag) {
            ""
        } else {
            let start = whole.end();
            let end = closing_tag_start(html, start, tag).unwrap_or(html.len());
            &html[start..end]
        };
        found.push(Element { tag: tag.to_string(), attrs: attrs.as_str(), inner });
    }
    found
}

/// Offset of the end tag matching an element whose content starts at `from`.
fn closing_tag_start(html: &str, from: usize, tag: &str) -> Option<usize> {
    let mut depth = 1usize;
    for cap in ANY_TAG.captures_iter(&html[from..]) {
        if !cap[2].eq_ignore_ascii_case(tag) {
            continue;
        }
        let m = cap.get(0)?;
        if &cap[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return Some(from + m.start());
            }
        } else if &cap[4] != "/" {
            depth += 1;
        }
    }
    None
}

/// All elements carrying `class` in their class list.
pub fn find_all_by_class<'a>(html: &'a str, class: &str) -> Vec<Element<'a>> {
    collect(html, |_, attrs| class_list_contains(attrs, class))
}

/// First element carrying `class`.
pub fn find_by_class<'a>(html: &'a str, class: &str) -> Option<Element<'a>> {
    find_all_by_class(html, class).into_iter().next()
}

/// Strip tags and decode entities; `<br>` becomes a newline.
pub fn text_content(markup: &str) -> String {
    let without_comments = COMMENT.replace_all(markup, "");
    let with_breaks = LINE_BREAK.replace_all(&without_comments, "\n");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped)
}

pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
