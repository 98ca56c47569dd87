use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billable hours in a month used for the hourly rate.
pub const DEFAULT_HOURS_PER_MONTH: Decimal = Decimal::from_parts(120, 0, 0, false, 0);

/// Local currency units per US dollar.
pub const DEFAULT_USD_TO_LOCAL_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 0);

/// Constants converting a monthly local-currency total into an hourly USD rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub hours_per_month: Decimal,
    pub usd_to_local_rate: Decimal,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            hours_per_month: DEFAULT_HOURS_PER_MONTH,
            usd_to_local_rate: DEFAULT_USD_TO_LOCAL_RATE,
        }
    }
}

impl ConversionConfig {
    /// Both constants are divisors and must be strictly positive.
    pub fn is_valid(&self) -> bool {
        self.hours_per_month > Decimal::ZERO && self.usd_to_local_rate > Decimal::ZERO
    }
}
