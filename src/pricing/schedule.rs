//! Fixed tariff schedules

/// Rate and fixed charge for one tier of a regime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRate {
    /// Charge per billing unit
    pub unit_charge: f64,
    /// Monthly fixed charge applied when this tier is the highest one used
    pub fixed_charge: f64,
}

/// Tier rates of one consumption regime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeTariff {
    pub tier1: TierRate,
    pub tier2: TierRate,
}

/// Consumption regime selected by total monthly units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Low,
    High,
}

/// Versioned tiered-rate table. Immutable configuration data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffSchedule {
    pub version: &'static str,
    /// Quantity making up one billing unit
    pub quantity_per_unit: f64,
    /// Upper bound (inclusive) of band A
    pub tier1_ceiling: f64,
    /// Upper bound (inclusive) of band B, also the low regime ceiling
    pub tier2_ceiling: f64,
    pub low: RegimeTariff,
    pub high: RegimeTariff,
}

impl TariffSchedule {
    pub fn regime_for_units(&self, units: f64) -> Regime {
        if units <= self.tier2_ceiling {
            Regime::Low
        } else {
            Regime::High
        }
    }

    pub fn tariff(&self, regime: Regime) -> &RegimeTariff {
        match regime {
            Regime::Low => &self.low,
            Regime::High => &self.high,
        }
    }
}

/// Sri Lanka domestic tariff. Units above 60 are billed at the tier 2 rate.
pub const SRI_LANKA_DOMESTIC: TariffSchedule = TariffSchedule {
    version: "lk-domestic-1",
    quantity_per_unit: 1000.0,
    tier1_ceiling: 30.0,
    tier2_ceiling: 60.0,
    low: RegimeTariff {
        tier1: TierRate { unit_charge: 2.5, fixed_charge: 30.00 },
        tier2: TierRate { unit_charge: 5.0, fixed_charge: 60.00 },
    },
    high: RegimeTariff {
        tier1: TierRate { unit_charge: 2.5, fixed_charge: 0.99 },
        tier2: TierRate { unit_charge: 4.85, fixed_charge: 0.99 },
    },
};
