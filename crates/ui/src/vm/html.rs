use std::collections::{HashMap, HashSet};

/// Clean trivia text for `dangerous_inner_html`.
///
/// Entities are decoded on the way through; only inline formatting tags survive.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ["b", "i", "em", "strong", "u", "sub", "sup", "br", "span", "code"]
        .into_iter()
        .collect();
    let attributes: HashMap<&str, HashSet<&str>> = HashMap::new();

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
