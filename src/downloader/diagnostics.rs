// Bot-detection diagnostics for engine error text
//
// YouTube answers automated access with messages like
// "Sign in to confirm you're not a bot". We only need a yes/no answer here;
// the adapter swaps the raw text for a fixed advisory when it matches.

use regex::Regex;

lazy_static::lazy_static! {
    // `bot` as a whole word, so hosts like "robotics.example" don't match
    static ref BOT_WORD_RE: Regex = Regex::new(r"(?i)\bbots?\b").unwrap();
}

const SIGN_IN_MARKER: &str = "sign in to confirm";

/// Check whether engine error text indicates the site refused automated access
pub fn is_bot_detection(error: &str) -> bool {
    let lower = error.to_lowercase();

    lower.contains(SIGN_IN_MARKER) || BOT_WORD_RE.is_match(error)
}
