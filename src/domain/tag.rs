use regex::Regex;
use std::sync::OnceLock;

/// Tags must be exactly `major.minor.patch.build` to take part in resolution.
const BUILD_TAG_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$";

fn build_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BUILD_TAG_PATTERN).expect("build tag pattern is valid"))
}

/// Check whether a tag is a four-component build version
pub fn is_build_tag(tag: &str) -> bool {
    build_tag_regex().is_match(tag)
}

/// Keep only four-component build tags, preserving input order.
pub fn filter_valid<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| is_build_tag(tag))
        .map(str::to_string)
        .collect()
}

/// Tags that are not four-component build versions.
pub fn filter_invalid<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| !is_build_tag(tag))
        .map(str::to_string)
        .collect()
}

/// Tags whose text starts with `prefix`.
///
/// This is a plain string prefix test: `"4.7.0"` selects `4.7.0.20` but also
/// `4.7.01.3`.
pub fn tags_starting_with(tags: &[String], prefix: &str) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.starts_with(prefix))
        .cloned()
        .collect()
}
