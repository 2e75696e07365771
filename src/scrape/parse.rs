//! Field parsers for shipment pages. Each returns `None` when the text is not
//! in the expected shape, leaving the caller to apply the field default.

use chrono::{Datelike, NaiveDate};

/// Genitive and abbreviated month names as the site prints them, matched by
/// prefix so both "мар" style abbreviations and full forms resolve.
const MONTHS: [(&str, u32); 12] = [
    ("янв", 1),
    ("февр", 2),
    ("мар", 3),
    ("апр", 4),
    ("мая", 5),
    ("июн", 6),
    ("июл", 7),
    ("авг", 8),
    ("сент", 9),
    ("окт", 10),
    ("нояб", 11),
    ("дек", 12),
];

const FREE_OF_CHARGE: &str = "бесплатно";

fn normalize_number(raw: &str) -> String {
    raw.trim()
        .trim_end_matches('₽')
        .trim_end_matches("руб.")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' | '\u{2013}' => '-',
            other => other,
        })
        .collect()
}

/// `"1 234,50 ₽"` → `1234.5`. Non-breaking and narrow spaces are group
/// separators.
pub fn money(raw: &str) -> Option<f64> {
    normalize_number(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Whole number of roubles or bonus points.
pub fn integer(raw: &str) -> Option<i32> {
    normalize_number(raw).parse().ok()
}

/// Spent bonuses. A `+` amount is an accrual, so nothing was spent.
pub fn bonuses(raw: &str) -> Option<i32> {
    if raw.contains('+') {
        return Some(0);
    }
    integer(raw)
}

pub fn assembly_and_delivery(raw: &str) -> Option<i32> {
    if raw.trim().to_lowercase() == FREE_OF_CHARGE {
        return Some(0);
    }
    integer(raw)
}

/// Discounts are shown negative; stored as a positive amount.
pub fn discount(raw: &str) -> Option<f64> {
    money(raw).map(f64::abs)
}

pub fn month_number(raw: &str) -> Option<u32> {
    let name = raw.trim().trim_end_matches('.').to_lowercase();
    if name.is_empty() {
        return None;
    }
    MONTHS
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, month)| *month)
}

/// `"12 марта, 10:00"` → `(12, 3)`.
pub fn day_month(raw: &str) -> Option<(u32, u32)> {
    let date_part = raw.split(',').next()?;
    let mut tokens = date_part.split_whitespace();
    let day = tokens.next()?.parse::<u32>().ok()?;
    let month = month_number(tokens.next()?)?;
    Some((day, month))
}

/// Assigns years to shipment dates read newest first. Pages show day and
/// month only; the year starts at the current one and steps back each time
/// the walk crosses from January into December.
#[derive(Debug, Clone)]
pub struct DateCursor {
    year: i32,
    previous_month: Option<u32>,
}

impl DateCursor {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            previous_month: None,
        }
    }

    pub fn starting_today() -> Self {
        Self::new(chrono::Local::now().year())
    }

    /// Resolves the page text to `YYYY-MM-DD`. Unparsable text and
    /// impossible dates return `None` without moving the cursor.
    pub fn resolve(&mut self, raw: &str) -> Option<String> {
        let (day, month) = day_month(raw)?;
        let year = if month == 12 && self.previous_month == Some(1) {
            self.year - 1
        } else {
            self.year
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        self.year = year;
        self.previous_month = Some(month);
        Some(date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("1\u{a0}234,50 ₽", Some(1234.5))]
    #[case("89,90\u{a0}₽", Some(89.9))]
    #[case("1\u{202f}000 ₽", Some(1000.0))]
    #[case("−150 ₽", Some(-150.0))]
    #[case("n/a", None)]
    #[case("", None)]
    fn money_cases(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(money(raw), expected);
    }

    #[rstest]
    #[case("+45", Some(0))]
    #[case("120", Some(120))]
    #[case("сто", None)]
    fn bonuses_cases(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(bonuses(raw), expected);
    }

    #[rstest]
    #[case("Бесплатно", Some(0))]
    #[case("199 ₽", Some(199))]
    #[case("скоро", None)]
    fn assembly_cases(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(assembly_and_delivery(raw), expected);
    }

    #[test]
    fn discount_is_absolute() {
        assert_eq!(discount("-250,00 ₽"), Some(250.0));
        assert_eq!(discount("250"), Some(250.0));
    }

    #[rstest]
    #[case("марта", Some(3))]
    #[case("февр.", Some(2))]
    #[case("сентября", Some(9))]
    #[case("мая", Some(5))]
    #[case("smarch", None)]
    fn month_cases(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(month_number(raw), expected);
    }

    #[test]
    fn day_month_ignores_the_time() {
        assert_eq!(day_month("12 марта, 10:00"), Some((12, 3)));
        assert_eq!(day_month("5 дек."), Some((5, 12)));
        assert_eq!(day_month("вчера, 10:00"), None);
    }

    #[test]
    fn cursor_steps_back_a_year_across_new_year() {
        let mut cursor = DateCursor::new(2024);
        assert_eq!(cursor.resolve("3 февр., 09:15").as_deref(), Some("2024-02-03"));
        assert_eq!(cursor.resolve("10 января, 12:00").as_deref(), Some("2024-01-10"));
        assert_eq!(cursor.resolve("28 декабря, 18:30").as_deref(), Some("2023-12-28"));
        assert_eq!(cursor.resolve("2 декабря, 18:30").as_deref(), Some("2023-12-02"));
    }

    #[test]
    fn unparsable_dates_leave_the_cursor_alone() {
        let mut cursor = DateCursor::new(2024);
        assert_eq!(cursor.resolve("10 января").as_deref(), Some("2024-01-10"));
        assert_eq!(cursor.resolve("сегодня"), None);
        assert_eq!(cursor.resolve("31 дек.").as_deref(), Some("2023-12-31"));
        assert_eq!(cursor.resolve("30 февраля"), None);
    }

    proptest! {
        #[test]
        fn resolved_years_never_increase(
            dates in prop::collection::vec((1u32..=28, 0usize..12), 1..40)
        ) {
            let mut cursor = DateCursor::new(2024);
            let mut last_year = 2024;
            for (day, month) in dates {
                let text = format!("{day} {}, 10:00", MONTHS[month].0);
                let resolved = cursor.resolve(&text);
                prop_assert!(resolved.is_some());
                let year: i32 = resolved.unwrap_or_default()[..4].parse().unwrap_or_default();
                prop_assert!(year <= last_year);
                last_year = year;
            }
        }
    }
}
