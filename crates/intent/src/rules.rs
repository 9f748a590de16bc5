use regex::{Captures, Regex, RegexBuilder};

pub(crate) enum Value<T> {
    Fixed(T),
    /// Computes the slot value from the match. Returning `None` rejects this
    /// occurrence; scanning moves on to the next occurrence, then the next rule.
    Derived(fn(&Captures<'_>) -> Option<T>),
}

pub(crate) struct Rule<T> {
    regex: Regex,
    value: Value<T>,
}

pub(crate) fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid pattern {pattern:?}: {e}"))
}

impl<T: Clone> Rule<T> {
    pub(crate) fn fixed(pattern: &str, value: T) -> Self {
        Self {
            regex: compile(pattern),
            value: Value::Fixed(value),
        }
    }

    pub(crate) fn derived(pattern: &str, derive: fn(&Captures<'_>) -> Option<T>) -> Self {
        Self {
            regex: compile(pattern),
            value: Value::Derived(derive),
        }
    }

    pub(crate) fn apply(&self, text: &str) -> Option<T> {
        match &self.value {
            Value::Fixed(value) => self.regex.is_match(text).then(|| value.clone()),
            Value::Derived(derive) => self.regex.captures_iter(text).find_map(|c| derive(&c)),
        }
    }
}

/// First rule (in table order) that yields a value.
pub(crate) fn first_match<T: Clone>(rules: &[Rule<T>], text: &str) -> Option<T> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// Every value produced by any rule, in table order, without duplicates.
pub(crate) fn all_matches<T: Clone + PartialEq>(rules: &[Rule<T>], text: &str) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in rules.iter().filter_map(|rule| rule.apply(text)) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

const CARDINALS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

const ORDINALS: [&str; 12] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth",
];

/// Alternation of the cardinal words understood by [`cardinal_value`].
pub(crate) fn cardinal_alternation() -> String {
    let mut words: Vec<&str> = vec!["thirty", "forty", "fifty"];
    words.extend(CARDINALS.iter().rev());
    words.join("|")
}

pub(crate) fn ordinal_alternation() -> String {
    ORDINALS.join("|")
}

pub(crate) fn cardinal_value(word: &str) -> Option<u32> {
    let word = word.to_ascii_lowercase();
    match word.as_str() {
        "thirty" => Some(30),
        "forty" => Some(40),
        "fifty" => Some(50),
        _ => CARDINALS.iter().position(|w| *w == word).map(|i| i as u32),
    }
}

pub(crate) fn ordinal_value(word: &str) -> Option<u32> {
    let word = word.to_ascii_lowercase();
    ORDINALS
        .iter()
        .position(|w| *w == word)
        .map(|i| i as u32 + 1)
}

/// Parses a capture group that holds either digits or a number word.
pub(crate) fn number_at(caps: &Captures<'_>, group: usize) -> Option<u32> {
    let raw = caps.get(group)?.as_str();
    raw.parse().ok().or_else(|| cardinal_value(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_words() {
        assert_eq!(cardinal_value("Twelve"), Some(12));
        assert_eq!(cardinal_value("fifty"), Some(50));
        assert_eq!(cardinal_value("dozen"), None);
        assert_eq!(ordinal_value("third"), Some(3));
        assert_eq!(ordinal_value("TWELFTH"), Some(12));
    }

    #[test]
    fn longer_words_are_tried_first() {
        let alternation = cardinal_alternation();
        let seventeen = alternation.find("seventeen").unwrap();
        let seven = alternation.find("|seven|").unwrap();
        assert!(seventeen < seven);
    }

    #[test]
    fn derived_rule_skips_rejected_occurrences() {
        let rule = Rule::derived(r"grade (\d+)", |c| {
            c[1].parse::<u32>().ok().filter(|n| *n <= 12)
        });
        assert_eq!(rule.apply("grade 40 or grade 4"), Some(4));
        assert_eq!(rule.apply("grade 40"), None);
    }

    #[test]
    fn all_matches_dedups_in_table_order() {
        let rules = vec![
            Rule::fixed(r"\bb\b", 'b'),
            Rule::fixed(r"\ba\b", 'a'),
            Rule::fixed(r"\bbee\b", 'b'),
        ];
        assert_eq!(all_matches(&rules, "a bee b"), vec!['b', 'a']);
    }
}
