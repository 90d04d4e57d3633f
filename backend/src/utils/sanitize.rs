use once_cell::sync::Lazy;
use regex::Regex;

// Comments, then anything that opens like a tag up to `>` or end of input.
// A `<` followed by whitespace is left alone ("a < b" stays readable).
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?(?:-->|$)|<[^\s>][^>]*(?:>|$)|<>").expect("tag pattern is valid")
});

/// Strips markup tags and surrounding whitespace from a submitted field.
pub fn clean(value: &str) -> String {
    TAG_RE.replace_all(value, "").trim().to_string()
}
