//! Display formatting for amounts, dates, shares and payment types.

use crate::domain::payment::{Payment, PaymentType};
use crate::domain::statistics::PaymentStatistics;
use chrono::DateTime;

/// Groups digits in threes: `1234567` becomes `"1,234,567"`.
pub fn format_amount(amount: impl Into<u128>) -> String {
    let digits = amount.into().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM` in UTC.
///
/// Timestamps outside chrono's range are rendered as the raw number.
pub fn format_date(epoch_millis: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M").to_string(),
        None => epoch_millis.to_string(),
    }
}

/// `part` as a share of `whole` with one decimal, `"0%"` when `whole` is 0.
pub fn format_percentage(part: u128, whole: u128) -> String {
    if whole == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

pub fn label_for(payment_type: PaymentType) -> &'static str {
    payment_type.label()
}

/// One line per payment for terminal output.
pub fn render_payment(payment: &Payment) -> String {
    format!(
        "{}  {:<24} {:>12}  fee {:>8}  {}",
        format_date(payment.timestamp),
        payment.title,
        format_amount(payment.amount),
        format_amount(payment.fee),
        label_for(payment.r#type)
    )
}

pub fn render_statistics(statistics: &PaymentStatistics) -> String {
    format!(
        "Payments: {}\nTotal:    {}\nFees:     {} ({})\nAverage:  {}",
        statistics.count,
        format_amount(statistics.total_amount),
        format_amount(statistics.total_fee),
        format_percentage(statistics.total_fee, statistics.total_amount),
        format_amount(statistics.average_amount)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0u64), "0");
        assert_eq!(format_amount(999u64), "999");
        assert_eq!(format_amount(1000u64), "1,000");
        assert_eq!(format_amount(58700u64), "58,700");
        assert_eq!(format_amount(1_234_567u64), "1,234,567");
        assert_eq!(
            format_amount(u128::from(u64::MAX) * 2),
            "36,893,488,147,419,103,230"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01 00:00");
        assert_eq!(format_date(1_704_103_200_000), "2024-01-01 10:00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5, 0), "0%");
        assert_eq!(format_percentage(1, 4), "25.0%");
        assert_eq!(format_percentage(2665, 58700), "4.5%");
    }

    #[test]
    fn test_render_statistics() {
        let statistics = PaymentStatistics {
            total_amount: 58700,
            total_fee: 2665,
            average_amount: 19566,
            count: 3,
        };
        assert_eq!(
            render_statistics(&statistics),
            "Payments: 3\nTotal:    58,700\nFees:     2,665 (4.5%)\nAverage:  19,566"
        );
        assert!(render_statistics(&PaymentStatistics::default()).contains("Fees:     0 (0%)"));
    }

    #[test]
    fn test_render_payment() {
        let payment = Payment::new("p1", "Coffee", 5500, 0, PaymentType::Card, "Food").with_fee(165);
        let line = render_payment(&payment);
        assert!(line.starts_with("1970-01-01 00:00  Coffee"));
        assert!(line.contains("5,500"));
        assert!(line.contains("fee      165"));
        assert!(line.ends_with("Card"));
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(PaymentType::Bank), "Bank Transfer");
        assert_eq!(label_for(PaymentType::Gift), "Gift Card");
    }
}
