//! Legacy grocery list markup.
//!
//! The grocery list view stores its list as serialized markup: one `<li>`
//! per item, holding the item text followed by a removal marker,
//!
//! ```text
//! <li>Flour<span>×</span></li><li>Eggs<span>×</span></li>
//! ```
//!
//! [`decode`] extracts the item names the way the list view reads them (the
//! text content of each entry, first marker removed, trimmed). [`encode_item`]
//! writes one entry in the same shape the list view writes it.

/// The removal marker appended to every entry.
pub const REMOVE_MARKER: char = '\u{00d7}';

/// Returns the byte offset of `needle` in `haystack` at or after `from`,
/// ignoring ASCII case.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Returns `true` if an `<li` match at `start` is a real `li` open tag and
/// not, say, `<link>`.
fn is_li_open(markup: &str, start: usize) -> bool {
    markup[start + 3..]
        .chars()
        .next()
        .is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
}

/// Finds the next `<li ...>` open tag at or after `from`, returning the
/// offsets of the tag start and the first content byte.
fn next_li(markup: &str, mut from: usize) -> Option<(usize, usize)> {
    loop {
        let start = find_ci(markup, "<li", from)?;
        if is_li_open(markup, start) {
            let end = markup[start..].find('>')? + start + 1;
            return Some((start, end));
        }
        from = start + 3;
    }
}

/// Removes every `<...>` tag, keeping the text between them.
fn strip_tags(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => rest = "",
        }
    }
    text.push_str(rest);
    text
}

/// Decodes the named entities the list view can produce plus numeric
/// character references. Unknown entities are kept verbatim.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        "times" => Some(REMOVE_MARKER),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Extracts the item names from list markup.
///
/// Entries whose text is empty after removing the marker are skipped.
///
/// # Examples
///
/// ```
/// use kk_store::markup::decode;
///
/// let names = decode("<li>Flour<span>×</span></li><li>Salt &amp; pepper<span>×</span></li>");
/// assert_eq!(names, vec!["Flour", "Salt & pepper"]);
/// ```
#[must_use]
pub fn decode(markup: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = 0;

    while let Some((_, content_start)) = next_li(markup, cursor) {
        // An entry ends at its close tag, or where the next entry begins.
        let close = find_ci(markup, "</li>", content_start);
        let next_open = next_li(markup, content_start).map(|(start, _)| start);
        let content_end = match (close, next_open) {
            (Some(c), Some(n)) => c.min(n),
            (Some(c), None) => c,
            (None, Some(n)) => n,
            (None, None) => markup.len(),
        };

        let text = decode_entities(&strip_tags(&markup[content_start..content_end]));
        let name = text.replacen(REMOVE_MARKER, "", 1);
        let name = name.trim();
        if !name.is_empty() {
            names.push(name.to_owned());
        }

        cursor = if close == Some(content_end) {
            content_end + "</li>".len()
        } else {
            content_end
        };
    }

    names
}

/// Escapes text for element content.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// Appends one list entry for `name` to `out`.
///
/// # Examples
///
/// ```
/// let mut markup = String::new();
/// kk_store::markup::encode_item("Fish & chips", &mut markup);
/// assert_eq!(markup, "<li>Fish &amp; chips<span>×</span></li>");
/// ```
pub fn encode_item(name: &str, out: &mut String) {
    out.push_str("<li>");
    escape_text(name, out);
    out.push_str("<span>");
    out.push(REMOVE_MARKER);
    out.push_str("</span></li>");
}

/// Encodes a whole list.
#[must_use]
pub fn encode<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        encode_item(name, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_view_output() {
        let markup = "<li>Milk<span>×</span></li><li class=\"checked\">Eggs<span>×</span></li>";
        assert_eq!(decode(markup), vec!["Milk", "Eggs"]);
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_case() {
        let markup = "\n  <LI>  Butter <span class=\"close\">&times;</span></LI>\n<li>\tJam\t</li>";
        assert_eq!(decode(markup), vec!["Butter", "Jam"]);
    }

    #[test]
    fn test_decode_unclosed_entries() {
        assert_eq!(decode("<li>Rice<li>Beans<span>×</span>"), vec!["Rice", "Beans"]);
    }

    #[test]
    fn test_decode_ignores_non_li_tags() {
        let markup = "<link rel=\"x\"><ul><li>Oats<span>×</span></li></ul>";
        assert_eq!(decode(markup), vec!["Oats"]);
    }

    #[test]
    fn test_decode_skips_empty_entries() {
        assert_eq!(decode("<li><span>×</span></li><li> </li>"), Vec::<String>::new());
        assert!(decode("").is_empty());
        assert!(decode("plain text, no list").is_empty());
    }

    #[test]
    fn test_decode_only_first_marker_removed() {
        assert_eq!(decode("<li>2×4 lumber<span>×</span></li>"), vec!["24 lumber×"]);
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode("<li>Cr&#232;me fra&#xEE;che</li>"), vec!["Crème fraîche"]);
        assert_eq!(decode("<li>A &unknown; B</li>"), vec!["A &unknown; B"]);
    }

    #[test]
    fn test_encode_escapes() {
        insta::assert_snapshot!(
            encode(["Salt & pepper", "<b>Bread</b>"]),
            @"<li>Salt &amp; pepper<span>×</span></li><li>&lt;b&gt;Bread&lt;/b&gt;<span>×</span></li>"
        );
    }

    #[test]
    fn test_encoded_names_decode_back() {
        let names = ["Fish & chips", "Tomato <large>", "Plain"];
        assert_eq!(decode(&encode(names)), names);
    }
}
