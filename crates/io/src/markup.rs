use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

static TAG: OnceLock<Regex> = OnceLock::new();

/// Remove `<...>` tags. Matching is lazy and does not cross line breaks, so
/// a stray `<` only swallows text up to the first `>` on the same line.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    let re = TAG.get_or_init(|| Regex::new(r"<.*?>").expect("tag pattern is valid"));
    re.replace_all(text, "")
}
