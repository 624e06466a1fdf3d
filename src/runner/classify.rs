use super::state::ActualOutcome;

/// Map the post-submit page state to an outcome. First match wins.
///
/// - address contains `secure` → success
/// - address contains `login`, or content mentions `error`/`invalid` → failure
/// - anything else → unknown
///
/// Content is matched case-insensitively; the address is matched as-is.
pub fn classify(url: &str, content: &str) -> ActualOutcome {
    if url.contains("secure") {
        return ActualOutcome::Success;
    }

    let content = content.to_lowercase();
    if url.contains("login") || content.contains("error") || content.contains("invalid") {
        ActualOutcome::Failure
    } else {
        ActualOutcome::Unknown
    }
}
