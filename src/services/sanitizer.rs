//! Input sanitization primitives for tabforge.
//!
//! Everything arriving from the builder form is hostile until proven
//! otherwise. These helpers are the only path form data takes into storage:
//! slug keys, plain-text fields, allow-listed rich text and raw URLs each
//! get their own routine. Escaping helpers for the render side live here too.

use url::Url;

/// Tags permitted in rich text content, with the attributes each may carry.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target", "rel"]),
    ("abbr", &["title"]),
    ("b", &[]),
    ("blockquote", &["cite"]),
    ("br", &[]),
    ("code", &[]),
    ("del", &[]),
    ("div", &["class"]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "width", "height", "class"]),
    ("ins", &[]),
    ("li", &[]),
    ("ol", &["class"]),
    ("p", &["class"]),
    ("pre", &[]),
    ("s", &[]),
    ("span", &["class"]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("table", &["class"]),
    ("tbody", &[]),
    ("td", &["colspan", "rowspan"]),
    ("th", &["colspan", "rowspan"]),
    ("thead", &[]),
    ("tr", &[]),
    ("u", &[]),
    ("ul", &["class"]),
];

/// Reduces a raw identifier to a slug-safe key: lowercase ASCII letters,
/// digits, underscore and hyphen. Everything else is dropped.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Reduces untrusted input to a single line of plain text: markup removed,
/// control characters dropped, whitespace runs collapsed, ends trimmed.
pub fn sanitize_text(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_control() || c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Filters rich text through a tag allow-list.
///
/// Allowed tags are rebuilt from scratch keeping only their allowed
/// attributes; `href`/`src` values are re-run through [`sanitize_url`] and
/// dropped when they do not survive. Disallowed tags and HTML comments are
/// removed while their inner text is kept. A stray `<` that never closes is
/// escaped rather than trusted.
pub fn sanitize_rich_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        if tail.starts_with("<!--") {
            match tail.find("-->") {
                Some(end) => {
                    rest = &tail[end + 3..];
                }
                None => {
                    rest = "";
                }
            }
            continue;
        }

        match tail.find('>') {
            Some(end) => {
                if let Some(clean) = rebuild_tag(&tail[1..end]) {
                    out.push_str(&clean);
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Sanitizes a raw URL for storage: trimmed, markup-unsafe characters
/// removed, then parsed. Only absolute `http`/`https` URLs with a host
/// survive; anything else collapses to the empty string.
pub fn sanitize_url(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | '"' | '\'' | ' '))
        .collect();
    if cleaned.is_empty() {
        return String::new();
    }

    match Url::parse(&cleaned) {
        Ok(url) => {
            let scheme_ok = url.scheme() == "http" || url.scheme() == "https";
            if scheme_ok && url.host_str().is_some() {
                url.to_string()
            } else {
                String::new()
            }
        }
        Err(_) => String::new(),
    }
}

/// Escapes text for placement inside HTML element content.
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text for placement inside a double-quoted HTML attribute value.
pub fn attr_escape(raw: &str) -> String {
    html_escape(raw)
}

/// Removes all markup, keeping only text content. Tags never contribute
/// text; an unterminated tag swallows the remainder.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        match tail.find('>') {
            Some(end) => rest = &tail[end + 1..],
            None => {
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Rebuilds one tag token against the allow-list, or returns `None` when
/// the tag is not permitted.
fn rebuild_tag(inner: &str) -> Option<String> {
    let inner = inner.trim();
    if inner.is_empty() {
        return None;
    }

    if let Some(name) = inner.strip_prefix('/') {
        let name = name.trim().to_ascii_lowercase();
        if allowed_attrs(&name).is_some() {
            return Some(format!("</{}>", name));
        }
        return None;
    }

    let body = inner.strip_suffix('/').unwrap_or(inner).trim();
    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();
    let allowed = allowed_attrs(&name)?;

    let mut tag = String::from("<");
    tag.push_str(&name);
    for (attr, value) in parse_attrs(&body[name_end..]) {
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = if attr == "href" || attr == "src" {
            let url = sanitize_url(&value);
            if url.is_empty() {
                continue;
            }
            url
        } else {
            value
        };
        tag.push(' ');
        tag.push_str(&attr);
        tag.push_str("=\"");
        tag.push_str(&attr_escape(&value));
        tag.push('"');
    }
    tag.push('>');
    Some(tag)
}

fn allowed_attrs(name: &str) -> Option<&'static [&'static str]> {
    ALLOWED_TAGS
        .iter()
        .find(|(tag, _)| *tag == name)
        .map(|(_, attrs)| *attrs)
}

/// Parses `name="value"` pairs out of a tag body. Bare and single-quoted
/// values are accepted; names are lowercased. Valueless attributes read as
/// empty strings.
fn parse_attrs(body: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '=' {
                break;
            }
            name.push(c.to_ascii_lowercase());
            chars.next();
        }
        if name.is_empty() {
            break;
        }

        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                chars.next();
            }
            match chars.peek().copied() {
                Some(quote) if quote == '"' || quote == '\'' => {
                    chars.next();
                    while let Some(&c) = chars.peek() {
                        chars.next();
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                _ => {
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                }
            }
        }
        attrs.push((name, value));
    }
    attrs
}
