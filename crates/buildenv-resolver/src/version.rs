//! Maven-style version ordering, used to pick the highest of two colliding
//! registry declarations.
//!
//! - Versions split into items on `.`, `-`, `_` and digit/letter transitions
//!   (`1.0rc1` is `1`, `0`, `rc`, `1`)
//! - Numeric items compare as numbers of any length and beat any qualifier
//! - Qualifiers order as `alpha` < `beta` < `milestone` < `rc` < `snapshot`
//!   < other text < release (`""`, `ga`, `final`) < `sp`
//! - Trailing `0` and release items are dropped at the end of every
//!   segment (before a `-` or a qualifier), so `1.0 == 1.0.0`,
//!   `2.0-rc1 == 2.0.0-rc1` and `1.0-SNAPSHOT < 1.0`

use std::cmp::Ordering;
use std::fmt;

/// A parsed version string with Maven ordering.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    original: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Decimal digits without leading zeros; zero is `"0"`.
    Number(String),
    Qualifier(Rank, String),
}

/// Qualifier ranks. `Text` covers unrecognized qualifiers, which compare
/// lexically among themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Text,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let mut items = Vec::new();
        let mut segment = 0;
        for (boundary, token) in tokenize(version) {
            let item = classify(token);
            if boundary || matches!(item, Item::Qualifier(..)) {
                trim_nulls(&mut items, segment);
                segment = items.len();
            }
            items.push(item);
        }
        trim_nulls(&mut items, segment);

        Self {
            original: version.to_string(),
            items,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

/// Drop trailing null items (`0`, release) from the segment starting at `start`.
fn trim_nulls(items: &mut Vec<Item>, start: usize) {
    while items.len() > start && items.last().is_some_and(Item::is_null) {
        items.pop();
    }
}

impl Item {
    fn is_null(&self) -> bool {
        compare_to_null(self).is_eq()
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|i| match (self.items.get(i), other.items.get(i)) {
                (Some(a), Some(b)) => compare_items(a, b),
                (Some(a), None) => compare_to_null(a),
                (None, Some(b)) => compare_to_null(b).reverse(),
                (None, None) => Ordering::Equal,
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn compare_items(a: &Item, b: &Item) -> Ordering {
    match (a, b) {
        (Item::Number(a), Item::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (Item::Number(_), Item::Qualifier(..)) => Ordering::Greater,
        (Item::Qualifier(..), Item::Number(_)) => Ordering::Less,
        (Item::Qualifier(Rank::Text, a), Item::Qualifier(Rank::Text, b)) => a.cmp(b),
        (Item::Qualifier(a, _), Item::Qualifier(b, _)) => a.cmp(b),
    }
}

/// Compare an item against the implicit padding of a shorter version.
fn compare_to_null(item: &Item) -> Ordering {
    match item {
        Item::Number(n) if n == "0" => Ordering::Equal,
        Item::Number(_) => Ordering::Greater,
        Item::Qualifier(rank, _) => rank.cmp(&Rank::Release),
    }
}

/// Split into tokens, each flagged when it opens a new segment (after `-`
/// or at a digit/letter transition).
fn tokenize(version: &str) -> Vec<(bool, String)> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = None;
    let mut boundary = false;

    for ch in version.trim().chars() {
        if ch == '.' || ch == '-' || ch == '_' {
            if !current.is_empty() {
                tokens.push((boundary, std::mem::take(&mut current)));
            }
            boundary = ch == '-';
            current_is_digit = None;
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if current_is_digit.is_some_and(|d| d != is_digit) && !current.is_empty() {
            tokens.push((boundary, std::mem::take(&mut current)));
            boundary = true;
        }
        current_is_digit = Some(is_digit);
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push((boundary, current));
    }
    tokens
}

fn classify(token: String) -> Item {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        let digits = token.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        return Item::Number(digits.to_string());
    }
    let lower = token.to_ascii_lowercase();
    let rank = match lower.as_str() {
        "alpha" | "a" => Rank::Alpha,
        "beta" | "b" => Rank::Beta,
        "milestone" | "m" => Rank::Milestone,
        "rc" | "cr" => Rank::Rc,
        "snapshot" => Rank::Snapshot,
        "ga" | "final" | "release" => Rank::Release,
        "sp" => Rank::Sp,
        _ => Rank::Text,
    };
    Item::Qualifier(rank, lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> MavenVersion {
        MavenVersion::parse(s)
    }

    #[test]
    fn basic_ordering() {
        assert!(v("1.0") < v("2.0"));
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.0.1") < v("1.1.0"));
    }

    #[test]
    fn numeric_not_lexical() {
        assert!(v("2.9.0") < v("2.11.0"));
        assert!(v("1.10") > v("1.9"));
    }

    #[test]
    fn qualifier_ordering() {
        assert!(v("1.0-alpha") < v("1.0-beta"));
        assert!(v("1.0-beta") < v("1.0-milestone"));
        assert!(v("1.0-milestone") < v("1.0-rc"));
        assert!(v("1.0-rc") < v("1.0-SNAPSHOT"));
        assert!(v("1.0-SNAPSHOT") < v("1.0"));
        assert!(v("1.0") < v("1.0-sp"));
    }

    #[test]
    fn release_aliases_equal() {
        assert_eq!(v("1.0"), v("1.0-ga"));
        assert_eq!(v("1.0"), v("1.0.Final"));
    }

    #[test]
    fn trailing_zeros_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0.0"));
    }

    #[test]
    fn digit_letter_transitions_split() {
        assert!(v("1.0rc1") < v("1.0rc2"));
        assert!(v("1.0rc2") < v("1.0"));
    }

    #[test]
    fn text_qualifiers_sort_below_release() {
        assert!(v("1.0.0-jre") < v("1.0.0"));
        assert!(v("31.0-jre") < v("32.0-jre"));
        assert!(v("32.0-android") < v("32.0-jre"));
    }

    #[test]
    fn trailing_zeros_before_qualifier_equal() {
        assert_eq!(v("2.0-rc1"), v("2.0.0-rc1"));
        assert_eq!(v("1-SNAPSHOT"), v("1.0.0-SNAPSHOT"));
        assert_eq!(v("1.0-SNAPSHOT"), v("1.0.0-SNAPSHOT"));
        assert_eq!(v("1.0rc1"), v("1rc1"));
        assert!(v("1.0-rc") < v("1.0.1-rc"));
        assert!(v("1-rc") < v("1.1"));
    }

    #[test]
    fn leading_zeros_ignored() {
        assert_eq!(v("1.01"), v("1.1"));
        assert!(v("1.010") > v("1.9"));
    }

    #[test]
    fn numbers_beyond_u64() {
        assert!(v("1.99999999999999999999") > v("1.2"));
        assert!(v("1.99999999999999999999") < v("1.100000000000000000000"));
        assert!(v("1.99999999999999999999") > v("1.99999999999999999999-SNAPSHOT"));
    }

    #[test]
    fn display_keeps_original() {
        assert_eq!(v("2.11.0").to_string(), "2.11.0");
        assert_eq!(v("1.0-Final").as_str(), "1.0-Final");
    }
}
