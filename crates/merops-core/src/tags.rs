// ── Tag reconciliation ──
//
// Pure set logic over a network's tag sequence: strip every tag with the
// hub prefix, then append the freshly computed one. Idempotent, so a run
// that repeats (or crashes between read and write) never accumulates
// duplicates. The write-back is a separate orchestrated call.

/// Default prefix marking hub tags managed by this tool.
pub const DEFAULT_HUB_TAG_PREFIX: &str = "HUB_";

/// Produce the next tag sequence: every prefix-matching tag removed
/// (exact, case-sensitive, anchored at the start), relative order of the
/// rest preserved, then `new_tag` appended when supplied.
pub fn reconcile(current: &[String], prefix: &str, new_tag: Option<&str>) -> Vec<String> {
    let mut next: Vec<String> = current
        .iter()
        .filter(|tag| !tag.starts_with(prefix))
        .cloned()
        .collect();
    if let Some(tag) = new_tag {
        next.push(tag.to_owned());
    }
    next
}

/// Build the hub tag for a hub's display name: prefix plus the name with
/// spaces flattened to underscores (tags cannot contain spaces).
pub fn hub_tag(prefix: &str, hub_name: &str) -> String {
    format!("{prefix}{}", hub_name.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn stale_hub_tags_are_replaced() {
        let current = tags(&["branch", "HUB_Old_Core", "west"]);
        let next = reconcile(&current, "HUB_", Some("HUB_New_Core"));

        assert_eq!(next, tags(&["branch", "west", "HUB_New_Core"]));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let current = tags(&["branch", "HUB_A", "HUB_B", "west"]);

        let once = reconcile(&current, "HUB_", Some("HUB_C"));
        let twice = reconcile(&once, "HUB_", Some("HUB_C"));

        assert_eq!(once, twice);
        let hub_tags: Vec<&String> = twice.iter().filter(|t| t.starts_with("HUB_")).collect();
        assert_eq!(hub_tags, vec!["HUB_C"], "exactly one hub tag survives");
    }

    #[test]
    fn successive_hubs_never_accumulate() {
        let current = tags(&["branch"]);

        let after_h1 = reconcile(&current, "HUB_", Some("HUB_One"));
        let after_h2 = reconcile(&after_h1, "HUB_", Some("HUB_Two"));

        assert_eq!(after_h2, tags(&["branch", "HUB_Two"]));
    }

    #[test]
    fn none_just_strips() {
        let current = tags(&["HUB_Old", "branch"]);
        assert_eq!(reconcile(&current, "HUB_", None), tags(&["branch"]));
    }

    #[test]
    fn prefix_match_is_anchored_and_case_sensitive() {
        let current = tags(&["myHUB_x", "hub_y", "HUB_z"]);
        let next = reconcile(&current, "HUB_", None);

        assert_eq!(next, tags(&["myHUB_x", "hub_y"]));
    }

    #[test]
    fn hub_tag_flattens_spaces() {
        assert_eq!(hub_tag("HUB_", "Core East DC"), "HUB_Core_East_DC");
    }
}
