use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

pub type StopId = Id<Stop>;

/// A place where vehicles pick up or drop off riders.
/// Primary key: `stop_id`. Immutable once loaded (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
    pub platform_code: Option<String>,
    pub location_type: Option<u8>,
}

impl HasId for Stop {
    type IdType = String;
}

impl Stop {
    /// Name used for hub-discovery grouping: lowercase, whitespace
    /// collapsed, trailing "station"/platform-number/parenthesized
    /// qualifiers stripped (§4.4 step 2a).
    pub fn normalized_name(&self) -> String {
        normalize_stop_name(&self.stop_name)
    }
}

pub fn normalize_stop_name(name: &str) -> String {
    let mut s = name.to_lowercase();

    // drop parenthesized qualifiers, e.g. "Central (Platform 3)"
    while let Some(open) = s.find('(') {
        if let Some(close) = s[open..].find(')') {
            s.replace_range(open..open + close + 1, "");
        } else {
            break;
        }
    }

    let words: Vec<&str> = s.split_whitespace().collect();
    let mut end = words.len();
    while end > 0 {
        let word = words[end - 1];
        let is_trailing_suffix = matches!(word, "station" | "stop" | "platform")
            || word.chars().all(|c| c.is_ascii_digit());
        if is_trailing_suffix && end > 1 {
            end -= 1;
        } else {
            break;
        }
    }
    words[..end].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_and_case() {
        assert_eq!(normalize_stop_name("  Central   Station "), "central");
    }

    #[test]
    fn strips_parenthesized_qualifier() {
        assert_eq!(
            normalize_stop_name("East Richmond (Metro)"),
            "east richmond"
        );
    }

    #[test]
    fn strips_trailing_platform_number() {
        assert_eq!(normalize_stop_name("Flinders Street 5"), "flinders street");
    }
}
