//! Semester identity parsing

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2,4}").expect("static regex"));

/// A semester as `(is_winter, start_year)`.
///
/// Parsed from strings such as `"WS23/24"`, `"SS2024"` or
/// `"WiSe 2023/2024"`. Winter semesters are named by the year they start in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Semester {
    pub is_winter: bool,
    pub start_year: i32,
}

impl Semester {
    pub fn new(is_winter: bool, start_year: i32) -> Self {
        Self {
            is_winter,
            start_year,
        }
    }

    pub fn winter(start_year: i32) -> Self {
        Self::new(true, start_year)
    }

    pub fn summer(start_year: i32) -> Self {
        Self::new(false, start_year)
    }
}

impl FromStr for Semester {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let is_winter =
            lowered.contains("ws") || lowered.contains("winter") || lowered.contains("wis");

        let digits = YEAR_PATTERN.find(&lowered).ok_or_else(|| {
            Error::config("semester", format!("could not parse year from '{s}'"))
        })?;
        let year: i32 = digits
            .as_str()
            .parse()
            .map_err(|_| Error::config("semester", format!("could not parse year from '{s}'")))?;
        let start_year = if year >= 2000 { year } else { 2000 + year };

        Ok(Self {
            is_winter,
            start_year,
        })
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_winter {
            write!(f, "WS{}/{}", self.start_year, self.start_year + 1)
        } else {
            write!(f, "SS{}", self.start_year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SS24", false, 2024)]
    #[case("SS2024", false, 2024)]
    #[case("WS23/24", true, 2023)]
    #[case("WiSe 2023/2024", true, 2023)]
    #[case("Wintersemester 2022/23", true, 2022)]
    #[case("SoSe 25", false, 2025)]
    #[case("(WS24/25 | Computation, Information and Technology)", true, 2024)]
    fn test_parse_semester(#[case] input: &str, #[case] winter: bool, #[case] year: i32) {
        let semester: Semester = input.parse().unwrap();
        assert_eq!(semester, Semester::new(winter, year));
    }

    #[test]
    fn test_two_and_four_digit_years_agree() {
        let short: Semester = "SS24".parse().unwrap();
        let long: Semester = "SS2024".parse().unwrap();
        assert_eq!(short.start_year, long.start_year);
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let err = "Winter".parse::<Semester>().unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(Semester::winter(2023).to_string(), "WS2023/2024");
        assert_eq!(Semester::summer(2024).to_string(), "SS2024");
    }
}
