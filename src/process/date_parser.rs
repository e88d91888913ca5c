use chrono::NaiveDate;

/// Formats tried in order. The Treasury page uses `MM/DD/YYYY`.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a table date cell into a calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_treasury_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(parse_date("01/02/2024"), expected);
        assert_eq!(parse_date(" 2024-01-02 "), expected);
        assert_eq!(parse_date("2024/01/02"), expected);
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("N/A"), None);
        assert_eq!(parse_date("0"), None);
        assert_eq!(parse_date("02/30/2024"), None);
    }
}
