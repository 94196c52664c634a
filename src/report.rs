//! 지표 표시용 문자열 포맷.

use crate::metrics::MetricsResult;

/// 천 단위 구분 기호와 소수점 둘째 자리로 포맷한다. 예: 27594000 -> "27,594,000.00"
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let raw = format!("{:.2}", value.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && !raw.trim_matches(['0', '.']).is_empty() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// "12.34%"
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// 요약 표의 대표 지표 4종(월 매출, ROE, ROA, 가동률).
pub fn headline_rows(m: &MetricsResult) -> [(&'static str, String); 4] {
    [
        ("Monthly Revenue", format_amount(m.monthly_revenue)),
        ("ROE", format_percent(m.roe)),
        ("ROA", format_percent(m.roa)),
        ("Plant Availability", format_percent(m.availability_pct)),
    ]
}

/// 지표 카드 6종(발전량, 투자비, ROE, ROA, 가동률, 월 매출).
pub fn metric_cards(m: &MetricsResult) -> [(&'static str, String); 6] {
    [
        ("Generation (kWe)", format_amount(m.generation_kw)),
        ("Investment + 20%", format_amount(m.investment)),
        ("ROE", format_percent(m.roe)),
        ("ROA", format_percent(m.roa)),
        ("Plant Availability", format_percent(m.availability_pct)),
        ("Monthly Revenue", format_amount(m.monthly_revenue)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_groups_thousands() {
        assert_eq!(format_amount(27_594_000.0), "27,594,000.00");
        assert_eq!(format_amount(315.0), "315.00");
        assert_eq!(format_amount(1000.5), "1,000.50");
        assert_eq!(format_amount(-195_324.0), "-195,324.00");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn amount_passes_through_non_finite() {
        assert_eq!(format_amount(f64::INFINITY), "inf");
        assert_eq!(format_amount(f64::NAN), "NaN");
    }

    #[test]
    fn percent_two_decimals() {
        assert_eq!(format_percent(95.833333), "95.83%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
