//! Normalized draw records.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::notice::PrizeGrade;

/// A draw as stored in the `double_color_ball` table.
///
/// The issue `code` is the natural key: the same code always refers to the
/// same draw, so re-fetching it updates rather than duplicates the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryDraw {
    /// Issue code, e.g. `2025110`
    pub code: String,
    /// Weekday as published (e.g. `四`)
    pub week: String,
    /// Comma-separated red balls
    pub red: String,
    /// Blue ball
    pub blue: String,
    /// Ticket sales for the issue
    pub sales: i64,
    /// Jackpot pool after the draw
    pub poolmoney: i64,
    /// Free-text winner summary
    pub content: String,
    /// Prize tiers
    pub prizegrades: Vec<PrizeGrade>,
    /// Draw date
    pub date: NaiveDate,
}

impl LotteryDraw {
    /// Calendar year of the draw.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Multi-line listing of the prize tiers.
    pub fn prize_grades_report(&self) -> String {
        let mut out = String::from("Prize grades:");
        for pg in &self.prizegrades {
            out.push_str(&format!(
                "\n  Grade {}: {} winner(s), {} per ticket",
                pg.grade,
                or_dash(&pg.typenum),
                or_dash(&pg.typemoney)
            ));
        }
        out
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

impl fmt::Display for LotteryDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Double color ball issue {}", self.code)?;
        writeln!(f, "Date: {} ({})", self.date, self.week)?;
        writeln!(f, "Red: {}", self.red)?;
        writeln!(f, "Blue: {}", self.blue)?;
        writeln!(f, "Sales: {}", format_thousands(self.sales))?;
        writeln!(f, "Pool: {}", format_thousands(self.poolmoney))?;
        writeln!(f, "Winners: {}", self.content)?;
        write!(f, "Prize grades: {}", self.prizegrades.len())
    }
}

/// Formats an integer with `,` thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LotteryDraw {
        LotteryDraw {
            code: "2025110".to_string(),
            week: "四".to_string(),
            red: "02,07,15,20,27,31".to_string(),
            blue: "09".to_string(),
            sales: 372456812,
            poolmoney: 2350915741,
            content: "共3注。".to_string(),
            prizegrades: vec![
                PrizeGrade {
                    grade: 1,
                    typenum: "3".to_string(),
                    typemoney: "6734219".to_string(),
                },
                PrizeGrade {
                    grade: 7,
                    typenum: String::new(),
                    typemoney: String::new(),
                },
            ],
            date: NaiveDate::from_ymd_opt(2025, 9, 25).unwrap(),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(372456812), "372,456,812");
        assert_eq!(format_thousands(-1234567), "-1,234,567");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_display_summary() {
        let text = sample().to_string();
        assert!(text.starts_with("Double color ball issue 2025110\n"));
        assert!(text.contains("Date: 2025-09-25 (四)"));
        assert!(text.contains("Sales: 372,456,812"));
        assert!(text.contains("Pool: 2,350,915,741"));
        assert!(text.ends_with("Prize grades: 2"));
    }

    #[test]
    fn test_prize_grades_report() {
        let report = sample().prize_grades_report();
        assert_eq!(
            report,
            "Prize grades:\n  Grade 1: 3 winner(s), 6734219 per ticket\n  Grade 7: - winner(s), - per ticket"
        );
    }

    #[test]
    fn test_year() {
        assert_eq!(sample().year(), 2025);
    }
}
