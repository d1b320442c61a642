use crate::error::{BookingError, Result};

// ---------------------------------------------------------------------------
// PricingStrategy
// ---------------------------------------------------------------------------

/// Pricing algorithm for a bundle of lessons. Strategies are injected at
/// the call site; nothing in the booking core knows which one is active.
pub trait PricingStrategy {
    /// Total price for `lesson_count` lessons at `base` each.
    fn price(&self, base: f64, lesson_count: u32) -> f64;

    fn name(&self) -> &'static str;

    fn describe(&self) -> String;
}

/// Resolve a strategy by name, for CLI and scenario use. `referrals` and
/// `discount` feed the strategies that need a parameter.
pub fn strategy_by_name(
    name: &str,
    referrals: u32,
    discount: f64,
) -> Result<Box<dyn PricingStrategy>> {
    match name {
        "standard" => Ok(Box::new(StandardPricing)),
        "bulk" => Ok(Box::new(BulkDiscount)),
        "seasonal" => Ok(Box::new(SeasonalDiscount::new("seasonal", discount))),
        "referral" => Ok(Box::new(ReferralPricing::new(referrals))),
        _ => Err(BookingError::UnknownStrategy(name.to_string())),
    }
}

// ---------------------------------------------------------------------------
// StandardPricing
// ---------------------------------------------------------------------------

pub struct StandardPricing;

impl PricingStrategy for StandardPricing {
    fn price(&self, base: f64, lesson_count: u32) -> f64 {
        base * lesson_count as f64
    }

    fn name(&self) -> &'static str {
        "standard"
    }

    fn describe(&self) -> String {
        "regular price with no discounts".to_string()
    }
}

// ---------------------------------------------------------------------------
// BulkDiscount
// ---------------------------------------------------------------------------

/// Tiered bundle discount: 10% off at 5+ lessons, 20% off at 10+.
pub struct BulkDiscount;

impl PricingStrategy for BulkDiscount {
    fn price(&self, base: f64, lesson_count: u32) -> f64 {
        let total = base * lesson_count as f64;
        match lesson_count {
            0..=4 => total,
            5..=9 => total * 0.90,
            _ => total * 0.80,
        }
    }

    fn name(&self) -> &'static str {
        "bulk"
    }

    fn describe(&self) -> String {
        "10% off for 5+ lessons, 20% off for 10+ lessons".to_string()
    }
}

// ---------------------------------------------------------------------------
// SeasonalDiscount
// ---------------------------------------------------------------------------

pub struct SeasonalDiscount {
    season: String,
    /// Fraction off, e.g. `0.15` for 15%.
    discount: f64,
}

impl SeasonalDiscount {
    pub fn new(season: impl Into<String>, discount: f64) -> Self {
        Self {
            season: season.into(),
            discount: discount.clamp(0.0, 1.0),
        }
    }
}

impl PricingStrategy for SeasonalDiscount {
    fn price(&self, base: f64, lesson_count: u32) -> f64 {
        base * lesson_count as f64 * (1.0 - self.discount)
    }

    fn name(&self) -> &'static str {
        "seasonal"
    }

    fn describe(&self) -> String {
        format!(
            "{} promotion: {:.0}% off",
            self.season,
            self.discount * 100.0
        )
    }
}

// ---------------------------------------------------------------------------
// ReferralPricing
// ---------------------------------------------------------------------------

/// 5% off per referral, capped at 30%.
pub struct ReferralPricing {
    referrals: u32,
}

impl ReferralPricing {
    pub fn new(referrals: u32) -> Self {
        Self { referrals }
    }

    fn discount(&self) -> f64 {
        (self.referrals as f64 * 0.05).min(0.30)
    }
}

impl PricingStrategy for ReferralPricing {
    fn price(&self, base: f64, lesson_count: u32) -> f64 {
        base * lesson_count as f64 * (1.0 - self.discount())
    }

    fn name(&self) -> &'static str {
        "referral"
    }

    fn describe(&self) -> String {
        format!(
            "5% off per referral (max 30%), currently {} referral(s)",
            self.referrals
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
