//! Утилиты форматирования чисел для таблиц

/// Форматирует число с разделителем тысяч (запятая) и указанным количеством знаков после точки
///
/// # Примеры
///
/// ```
/// use frontend::shared::components::table::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    // Вставляем запятые каждые 3 цифры с конца целой части
    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Форматирует цену с 2 знаками после точки и разделителем тысяч
pub fn format_price(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.56), "1,234.56");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(-1234.5), "-1,234.50");
        assert_eq!(format_price(999.0), "999.00");
    }

    #[test]
    fn test_format_without_decimals() {
        assert_eq!(format_number_with_decimals(500.0, 0), "500");
        assert_eq!(format_number_with_decimals(-100000.0, 0), "-100,000");
    }
}
