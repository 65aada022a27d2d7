//! Category filter expressions for `dotnet test --filter`.
//!
//! Included categories are OR-combined, excluded categories are OR-combined, and the two
//! groups are AND-combined with the included group first:
//!
//! ```text
//! (Category=a|Category=b)&(Category!=c|Category!=d)
//! ```
//!
//! Names are passed through verbatim: no deduplication and no escaping. A name containing
//! filter syntax characters produces a corrupted expression, so such names are reported
//! with a warning.

/// Trait name the external runner matches categories against.
pub const CATEGORY_TRAIT: &str = "Category";

/// Characters that carry meaning inside a filter expression.
const FILTER_SYNTAX_CHARS: &[char] = &['|', '&', '(', ')', '=', '!'];

/// Build the filter expression for the given include/exclude lists.
///
/// Returns an empty string when both lists are empty, meaning no `--filter` argument
/// should be passed to the runner at all.
pub fn build_filter<S: AsRef<str>>(included: &[S], excluded: &[S]) -> String {
    for name in included.iter().chain(excluded) {
        if has_filter_syntax(name.as_ref()) {
            tracing::warn!(
                category = name.as_ref(),
                "category name contains filter syntax characters and is passed through unescaped"
            );
        }
    }

    let included = join_group(included, "=");
    let excluded = join_group(excluded, "!=");

    match (included, excluded) {
        (Some(inc), Some(exc)) => format!("{inc}&{exc}"),
        (Some(group), None) | (None, Some(group)) => group,
        (None, None) => String::new(),
    }
}

/// OR-combine one list into a parenthesized group, or `None` when the list is empty.
fn join_group<S: AsRef<str>>(names: &[S], op: &str) -> Option<String> {
    if names.is_empty() {
        return None;
    }

    let clauses: Vec<String> = names
        .iter()
        .map(|name| format!("{CATEGORY_TRAIT}{op}{}", name.as_ref()))
        .collect();

    Some(format!("({})", clauses.join("|")))
}

/// Returns true if the name would alter the structure of the expression.
pub fn has_filter_syntax(name: &str) -> bool {
    name.contains(FILTER_SYNTAX_CHARS)
}
