pub const DEFAULT_PLAN: &str = "premium_50";

/// Plan identifiers are free-form strings derived from the paid amount,
/// e.g. `premium_50` for a 50 USD invoice. Notifications without an amount
/// fall back to the default plan.
pub fn plan_for_amount(price_amount: Option<f64>) -> String {
    match price_amount {
        Some(amount) if amount.fract() == 0.0 => format!("premium_{}", amount as i64),
        Some(amount) => format!("premium_{}", amount),
        None => DEFAULT_PLAN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_render_without_decimals() {
        assert_eq!(plan_for_amount(Some(50.0)), "premium_50");
        assert_eq!(plan_for_amount(Some(120.0)), "premium_120");
    }

    #[test]
    fn fractional_amounts_keep_their_decimals() {
        assert_eq!(plan_for_amount(Some(49.99)), "premium_49.99");
    }

    #[test]
    fn missing_amount_falls_back_to_default_plan() {
        assert_eq!(plan_for_amount(None), DEFAULT_PLAN);
    }
}
