use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Collect placeholder tokens that must survive translation byte-for-byte:
/// `{{name}}` / `{{ user.name }}` style and `%{name}` style.
pub fn extract_placeholders(s: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();

    static RE_CURLY: OnceLock<Regex> = OnceLock::new();
    let re_curly = RE_CURLY.get_or_init(|| Regex::new(r"\{\{\s*[\w.]+\s*\}\}").unwrap());
    for m in re_curly.find_iter(s) {
        set.insert(m.as_str().to_string());
    }

    static RE_PCT: OnceLock<Regex> = OnceLock::new();
    let re_pct = RE_PCT.get_or_init(|| Regex::new(r"%\{\w+\}").unwrap());
    for m in re_pct.find_iter(s) {
        set.insert(m.as_str().to_string());
    }

    set
}
