//! Minimal element lookup over saved pages.
//!
//! Elements are matched by tag name, a class token and a `data-qa`
//! attribute, any of which may be left open. That is all the shipment pages
//! need. Tag detection is
//! case-insensitive and tolerant of attribute order and quoting style.

use once_cell::sync::Lazy;
use regex::Regex;

static OPEN_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<([a-zA-Z][a-zA-Z0-9]*)((?:\s[^>]*)?)>").expect("valid open tag regex")
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute regex")
});

static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid html tag regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\n]+").expect("valid whitespace regex"));

/// Where a field lives on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub tag: Option<&'static str>,
    pub class: Option<&'static str>,
    pub data_qa: Option<&'static str>,
}

impl Locator {
    pub const fn class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag: Some(tag),
            class: Some(class),
            data_qa: None,
        }
    }

    /// Any element carrying both the `data-qa` value and the class token
    pub const fn data_qa(data_qa: &'static str, class: &'static str) -> Self {
        Self {
            tag: None,
            class: Some(class),
            data_qa: Some(data_qa),
        }
    }

    /// Same element without the class requirement
    pub const fn any_class(self) -> Self {
        Self {
            class: None,
            ..self
        }
    }

    fn matches(&self, tag: &str, attrs: &str) -> bool {
        if self.tag.is_some_and(|wanted| !tag.eq_ignore_ascii_case(wanted)) {
            return false;
        }
        let class_ok = self.class.map_or(true, |wanted| {
            attribute(attrs, "class")
                .map(|value| value.split_whitespace().any(|token| token == wanted))
                .unwrap_or(false)
        });
        let data_qa_ok = self
            .data_qa
            .map_or(true, |wanted| attribute(attrs, "data-qa") == Some(wanted));
        class_ok && data_qa_ok
    }
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTR_RE.captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str())
    })
}

/// Inner HTML of every element matching `locator`, in document order.
/// Nested matches are reported along with their ancestors.
pub fn select_all<'a>(html: &'a str, locator: &Locator) -> Vec<&'a str> {
    let lower = html.to_ascii_lowercase();
    let found = elements(html, &lower, locator).collect();
    found
}

/// Inner HTML of the first element matching `locator`. Stops scanning at the
/// first match.
pub fn select_first<'a>(html: &'a str, locator: &Locator) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let first = elements(html, &lower, locator).next();
    first
}

/// `lower` is `html` lowercased; ASCII lowercasing keeps byte offsets, so
/// positions found in one index the other.
fn elements<'a, 'b>(
    html: &'a str,
    lower: &'b str,
    locator: &'b Locator,
) -> impl Iterator<Item = &'a str> + 'b
where
    'a: 'b,
{
    OPEN_TAG_RE.captures_iter(html).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let tag = caps.get(1)?.as_str();
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        if !locator.matches(tag, attrs) {
            return None;
        }
        if attrs.trim_end().ends_with('/') {
            return Some("");
        }
        Some(inner_html(html, lower, whole.end(), tag))
    })
}

/// Text of the first element matching `locator`; `None` when the element is
/// missing or has no visible text.
pub fn select_text(html: &str, locator: &Locator) -> Option<String> {
    select_first(html, locator)
        .map(text_content)
        .filter(|text| !text.is_empty())
}

/// `href` of every `<a>` element, in document order.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    OPEN_TAG_RE
        .captures_iter(html)
        .filter(|caps| {
            caps.get(1)
                .map_or(false, |tag| tag.as_str().eq_ignore_ascii_case("a"))
        })
        .filter_map(|caps| attribute(caps.get(2)?.as_str(), "href").map(decode_entities))
        .collect()
}

/// Scans forward from `start` for the close tag balancing an open `tag`.
/// An unclosed element runs to the end of the document.
fn inner_html<'a>(html: &'a str, lower: &str, start: usize, tag: &str) -> &'a str {
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}", tag.to_ascii_lowercase());

    let mut depth = 1usize;
    let mut cursor = start;
    loop {
        let Some(next_close) = find_tag(lower, cursor, &close) else {
            return &html[start..];
        };
        let nested_open = lower[cursor..next_close]
            .match_indices(&open)
            .filter(|(pos, _)| is_tag_boundary(lower, cursor + pos + open.len()))
            .count();
        depth += nested_open;
        depth -= 1;
        if depth == 0 {
            return &html[start..next_close];
        }
        cursor = next_close + close.len();
    }
}

/// Next occurrence of `prefix` from `from` that ends at a tag-name boundary,
/// so `</p` does not stop at `</path>`.
fn find_tag(lower: &str, from: usize, prefix: &str) -> Option<usize> {
    lower[from..]
        .match_indices(prefix)
        .map(|(pos, _)| from + pos)
        .find(|&pos| is_tag_boundary(lower, pos + prefix.len()))
}

fn is_tag_boundary(lower: &str, at: usize) -> bool {
    lower[at..]
        .chars()
        .next()
        .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace())
}

/// Visible text: tags removed, entities decoded, runs of ASCII whitespace
/// collapsed. Non-breaking spaces survive so parsers can see them.
pub fn text_content(fragment: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&nbsp;", "\u{a0}")
        .replace("&#160;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
