//! Turn tree labels like `construct: acute threat ("fear")` into URL tags.

/// Sequences replaced by `-`, applied in this order.
const HYPHENATED: [&str; 5] = [", ", "/", "; ", " - ", " "];

/// Characters removed outright.
const STRIPPED: [char; 3] = ['(', ')', '"'];

/// Normalize a tree label into the tag used in construct URLs.
///
/// Keeps the text after the last `:`, drops the separator whitespace that
/// follows it, hyphenates the punctuation in [`HYPHENATED`] and removes
/// parentheses and quotes. The site publishes the language construct under
/// `language-behavior`, so a bare `language` tag is rewritten to that.
pub fn normalize_tag(label: &str) -> String {
    let tail = label.rsplit(':').next().unwrap_or(label);
    let mut tag = tail.trim_start().to_string();

    for pat in HYPHENATED {
        tag = tag.replace(pat, "-");
    }
    tag.retain(|c| !STRIPPED.contains(&c));
    // Removing a bracket can expose whitespace that was not leading before.
    let mut tag = tag.trim_start().to_string();

    if tag == "language" {
        tag.push_str("-behavior");
    }
    tag
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase and whitespace-collapse a raw label before normalizing it.
pub fn clean_label(raw: &str) -> String {
    collapse_ws(raw).to_lowercase()
}
