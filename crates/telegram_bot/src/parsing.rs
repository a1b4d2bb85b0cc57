//! Deterministic splitting of a message into an amount and a label.

/// Splits `input` into a numeric amount and a free-text label.
///
/// The number must be the first whitespace-separated token followed by a
/// non-empty remainder, or the last token preceded by one. The remainder may
/// contain no digits anywhere and must touch the split across whitespace
/// only: the remainder character adjacent to the split has to be a word
/// character, so `"comida, 12"` is rejected. A decimal comma is normalized
/// to a point before conversion.
///
/// Returns `None` on any ambiguity; never panics.
pub(crate) fn split_expense(input: &str) -> Option<(f64, String)> {
    let trimmed = input.trim();

    let Some((first, rest)) = trimmed.split_once(char::is_whitespace) else {
        return None;
    };

    // number at the start: "<num> <label>"
    if let Some(value) = parse_amount(first) {
        let label = rest.trim_start();
        if !label_accepts(label, label.chars().next()) {
            return None;
        }
        return Some((value, label.to_string()));
    }

    // number at the end: "<label> <num>"
    let (head, last) = trimmed.rsplit_once(char::is_whitespace)?;
    let value = parse_amount(last)?;
    let label = head.trim_end();
    if !label_accepts(label, label.chars().next_back()) {
        return None;
    }
    Some((value, label.to_string()))
}

/// The label must be non-empty, digit-free, and end on a word character at
/// the side touching the number.
fn label_accepts(label: &str, adjacent: Option<char>) -> bool {
    if label.is_empty() || label.chars().any(char::is_numeric) {
        return false;
    }
    adjacent.is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Accepts `digits[ . or , digits]`; anything else is not a number token.
fn parse_amount(token: &str) -> Option<f64> {
    let (int_part, frac_part) = match token.find([',', '.']) {
        Some(idx) => {
            let (head, tail) = token.split_at(idx);
            (head, Some(&tail[1..]))
        }
        None => (token, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part
        && (frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    token.replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_first() {
        assert_eq!(split_expense("12 comida"), Some((12.0, "comida".to_string())));
        assert_eq!(
            split_expense("12.34 en comida"),
            Some((12.34, "en comida".to_string()))
        );
        assert_eq!(
            split_expense("12,34 en comida"),
            Some((12.34, "en comida".to_string()))
        );
    }

    #[test]
    fn number_last() {
        assert_eq!(split_expense("comida 12"), Some((12.0, "comida".to_string())));
        assert_eq!(
            split_expense("gasto de 12.34"),
            Some((12.34, "gasto de".to_string()))
        );
        assert_eq!(
            split_expense("gasto de 12,34"),
            Some((12.34, "gasto de".to_string()))
        );
    }

    #[test]
    fn surrounding_and_repeated_whitespace_is_tolerated() {
        assert_eq!(
            split_expense("   12   comida   "),
            Some((12.0, "comida".to_string()))
        );
        assert_eq!(split_expense("comida    12"), Some((12.0, "comida".to_string())));
    }

    #[test]
    fn decimal_comma_converts_to_float() {
        let (value, label) = split_expense("45,6 cena").unwrap();
        assert!((value - 45.6).abs() < f64::EPSILON);
        assert_eq!(label, "cena");
    }

    #[test]
    fn two_numbers_reject() {
        assert_eq!(split_expense("comida 12 34"), None);
        assert_eq!(split_expense("12 comida 34"), None);
    }

    #[test]
    fn punctuation_hugging_the_split_rejects() {
        assert_eq!(split_expense("comida, 12"), None);
    }

    #[test]
    fn missing_number_or_label_rejects() {
        assert_eq!(split_expense("abc"), None);
        assert_eq!(split_expense("12"), None);
        assert_eq!(split_expense(""), None);
    }

    #[test]
    fn number_not_space_separated_rejects() {
        assert_eq!(split_expense("comida12"), None);
        assert_eq!(split_expense("12comida"), None);
        assert_eq!(split_expense("co12 mida"), None);
    }

    #[test]
    fn malformed_decimals_reject() {
        assert_eq!(split_expense("comida 12."), None);
        assert_eq!(split_expense(".12 comida"), None);
    }
}
