//! Price arithmetic shared by the catalog, the cart and outgoing messages.
//! Amounts are whole rupees.

/// Discount percentage of `price` against the list price `mrp`, rounded to
/// the nearest whole percent. Returns 0 when the product is not discounted.
pub fn calculate_discount(mrp: i64, price: i64) -> i64 {
    if mrp <= price {
        return 0;
    }
    (((mrp - price) as f64 / mrp as f64) * 100.0).round() as i64
}

/// Formats an amount the way `en-IN` currency formatting does, e.g. `₹1,23,456`.
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    if amount < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_lakhs_and_crores() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(3200), "₹3,200");
        assert_eq!(format_inr(123_456), "₹1,23,456");
        assert_eq!(format_inr(12_345_678), "₹1,23,45,678");
        assert_eq!(format_inr(-1500), "-₹1,500");
    }
}
