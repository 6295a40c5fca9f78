use serde::{Deserialize, Serialize};

/// Price of a single-year employment verification, USD
pub const BASE_PRICE: f64 = 25.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub currency: String,
    pub base_price: f64,
    pub years_requested: u32,
    pub multiplier: f64,
    pub total: f64,
}

/// Quote a verification covering `years` of history
pub fn quote(years: u32) -> Pricing {
    let multiplier = match years {
        0 | 1 => 1.0,
        2 | 3 => 1.5,
        _ => 2.0,
    };

    Pricing {
        currency: "USD".to_owned(),
        base_price: BASE_PRICE,
        years_requested: years,
        multiplier,
        total: (BASE_PRICE * multiplier * 100.0).round() / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_by_years() {
        assert_eq!(quote(1).total, 25.0);
        assert_eq!(quote(3).multiplier, 1.5);
        assert_eq!(quote(3).total, 37.5);
        assert_eq!(quote(7).total, 50.0);
        assert_eq!(quote(7).years_requested, 7);
    }
}
