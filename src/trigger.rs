/// Canonical name of the trigger command.
pub const TRIGGER: &str = "smoke";

/// The slash-prefixed spelling looked for in free-text comment bodies.
const TRIGGER_TOKEN: &str = "/smoke";

/// Decide whether the event invokes the smoke trigger.
///
/// Two independent signals, either suffices: the structured command channel
/// (already canonicalized) equals the trigger name, or the comment body
/// carries `/smoke` as a standalone whitespace-delimited token. Word-level
/// matching keeps `/smokebomb` from triggering; the comparison ignores case
/// because comment text arrives unnormalized.
pub fn is_triggered(canonical_command: &str, comment_body: &str) -> bool {
    if canonical_command == TRIGGER {
        return true;
    }
    comment_body
        .split_whitespace()
        .any(|word| word.eq_ignore_ascii_case(TRIGGER_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_triggers() {
        assert!(is_triggered("smoke", ""));
    }

    #[test]
    fn test_body_token_triggers() {
        assert!(is_triggered("", "please run /smoke now"));
        assert!(is_triggered("", "/smoke"));
        assert!(is_triggered("", "ship it\n/SMOKE\nthanks"));
    }

    #[test]
    fn test_prefix_of_longer_word_does_not_trigger() {
        assert!(!is_triggered("", "/smokebomb"));
        assert!(!is_triggered("", "see docs/smoke.md"));
    }

    #[test]
    fn test_unrelated_command_and_body_do_not_trigger() {
        assert!(!is_triggered("other", "no trigger here"));
        assert!(!is_triggered("", ""));
    }

    #[test]
    fn test_bare_word_in_body_does_not_trigger() {
        // Only the slash-prefixed spelling counts in free text.
        assert!(!is_triggered("", "smoke test passed"));
    }
}
