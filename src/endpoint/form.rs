//! `application/x-www-form-urlencoded` decoding

use std::collections::HashMap;

/// Decode a form body into a field map. Later duplicates win.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_percent_and_plus() {
        let form = parse_form("form_type=mass_holidays&holiday_data=%7B%2215%22%3A%22HOLIS%22%7D&name=Ada+L");
        assert_eq!(form["form_type"], "mass_holidays");
        assert_eq!(form["holiday_data"], r#"{"15":"HOLIS"}"#);
        assert_eq!(form["name"], "Ada L");
    }

    #[test]
    fn test_truncated_escape_is_kept_literally() {
        let form = parse_form("a=100%&b=%4");
        assert_eq!(form["a"], "100%");
        assert_eq!(form["b"], "%4");
    }

    #[test]
    fn test_repeated_field_keeps_last_value() {
        let form = parse_form("user_id=1&user_id=2");
        assert_eq!(form["user_id"], "2");
    }

    #[test]
    fn test_key_without_value() {
        let form = parse_form("flag&x=1");
        assert_eq!(form["flag"], "");
        assert_eq!(form["x"], "1");
    }
}
