//! String transformation utilities for code generation

/// Convert a string to lowerCamelCase
///
/// `_`, `-`, `.` and spaces separate words and are dropped, a digit also
/// starts a new word, a run of capitals is folded into one word and any other
/// punctuation is removed.
pub fn to_lower_camel_case(s: &str) -> String {
    to_camel_init_case(s, false)
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    to_camel_init_case(s, true)
}

fn to_camel_init_case(s: &str, init_case: bool) -> String {
    let s = s.trim();
    let mut result = String::with_capacity(s.len());
    let mut cap_next = init_case;
    let mut prev_is_cap = false;

    for (i, ch) in s.chars().enumerate() {
        let is_cap = ch.is_ascii_uppercase();
        let is_low = ch.is_ascii_lowercase();

        let out = if cap_next {
            ch.to_ascii_uppercase()
        } else if i == 0 || (prev_is_cap && is_cap) {
            ch.to_ascii_lowercase()
        } else {
            ch
        };
        prev_is_cap = is_cap;

        if is_cap || is_low {
            result.push(out);
            cap_next = false;
        } else if ch.is_ascii_digit() {
            result.push(ch);
            cap_next = true;
        } else {
            cap_next = matches!(ch, '_' | '-' | '.' | ' ');
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_upper_camel_case() {
        assert_eq!(to_upper_camel_case("find_pets_by_status"), "FindPetsByStatus");
        assert_eq!(to_upper_camel_case("findPetsByStatus"), "FindPetsByStatus");
        assert_eq!(to_upper_camel_case("find-pets-by-status"), "FindPetsByStatus");
        assert_eq!(to_upper_camel_case("google"), "Google");
        assert_eq!(to_upper_camel_case("empty"), "Empty");
        assert_eq!(to_upper_camel_case("http_response"), "HttpResponse");
    }

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("user_id"), "userId");
        assert_eq!(to_lower_camel_case("find_pets_by_status"), "findPetsByStatus");
        assert_eq!(to_lower_camel_case("FindPetsByStatus"), "findPetsByStatus");
        assert_eq!(to_lower_camel_case("find-pets-by-status"), "findPetsByStatus");
        assert_eq!(to_lower_camel_case("num_to_increase"), "numToIncrease");
        assert_eq!(to_lower_camel_case("alreadyCamel"), "alreadyCamel");
    }

    #[test]
    fn test_capital_runs_are_folded() {
        assert_eq!(to_lower_camel_case("HTTPGet"), "httpget");
        assert_eq!(to_lower_camel_case("ID"), "id");
    }

    #[test]
    fn test_digits_start_a_new_word() {
        assert_eq!(to_lower_camel_case("field1name"), "field1Name");
        assert_eq!(to_upper_camel_case("v2_api"), "V2Api");
    }

    #[test]
    fn test_separators_and_punctuation_are_dropped() {
        assert_eq!(to_lower_camel_case("post_req.b"), "postReqB");
        assert_eq!(to_lower_camel_case("a$b"), "ab");
        assert_eq!(to_lower_camel_case("_leading"), "Leading");
        assert_eq!(to_lower_camel_case("  padded_name  "), "paddedName");
        assert_eq!(to_lower_camel_case(""), "");
    }
}
