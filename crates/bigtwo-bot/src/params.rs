/// Thresholds used by the heuristic policies.
///
/// Defaults reproduce the tuned constants; each value can be overridden from
/// a `BIGTWO_*` environment variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyParams {
    balance_low_cutoff: f64,
    balance_hold_min_hand: usize,
    balance_hold_value: f64,
    reserve_limit: u32,
    charge_keep_hand: usize,
    charge_margin: f64,
    charge_low_factor: f64,
    aggressive_offset: i32,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            balance_low_cutoff: 25.5,
            balance_hold_min_hand: 7,
            balance_hold_value: 44.0,
            reserve_limit: 85,
            charge_keep_hand: 8,
            charge_margin: 1.0,
            charge_low_factor: 0.6,
            aggressive_offset: 30,
        }
    }
}

impl PolicyParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let balance_low_cutoff = read("BIGTWO_BALANCE_LOW_CUTOFF")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && (0.0..=51.0).contains(value))
            .unwrap_or(defaults.balance_low_cutoff);

        let balance_hold_min_hand = read("BIGTWO_BALANCE_HOLD_MIN_HAND")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value <= 13)
            .unwrap_or(defaults.balance_hold_min_hand);

        let balance_hold_value = read("BIGTWO_BALANCE_HOLD_VALUE")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(defaults.balance_hold_value);

        let reserve_limit = read("BIGTWO_RESERVE_LIMIT")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(defaults.reserve_limit);

        let charge_keep_hand = read("BIGTWO_CHARGE_KEEP_HAND")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value <= 13)
            .unwrap_or(defaults.charge_keep_hand);

        let charge_margin = read("BIGTWO_CHARGE_MARGIN")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(defaults.charge_margin);

        let charge_low_factor = read("BIGTWO_CHARGE_LOW_FACTOR")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(defaults.charge_low_factor);

        let aggressive_offset = read("BIGTWO_AGGRESSIVE_OFFSET")
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .unwrap_or(defaults.aggressive_offset);

        Self {
            balance_low_cutoff,
            balance_hold_min_hand,
            balance_hold_value,
            reserve_limit,
            charge_keep_hand,
            charge_margin,
            charge_low_factor,
            aggressive_offset,
        }
    }

    /// Average card value separating "low" from "high" combinations.
    pub const fn balance_low_cutoff(self) -> f64 {
        self.balance_low_cutoff
    }

    /// Balance holds back its weakest answer only while every opponent still
    /// has at least this many cards.
    pub const fn balance_hold_min_hand(self) -> usize {
        self.balance_hold_min_hand
    }

    /// Average value at which that answer is held back.
    pub const fn balance_hold_value(self) -> f64 {
        self.balance_hold_value
    }

    pub const fn reserve_limit(self) -> u32 {
        self.reserve_limit
    }

    pub const fn charge_keep_hand(self) -> usize {
        self.charge_keep_hand
    }

    pub const fn charge_margin(self) -> f64 {
        self.charge_margin
    }

    pub const fn charge_low_factor(self) -> f64 {
        self.charge_low_factor
    }

    pub const fn aggressive_offset(self) -> i32 {
        self.aggressive_offset
    }
}
