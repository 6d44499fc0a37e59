//! Tariff engine for electricity bill calculation
//!
//! Converts a monthly energy quantity into an itemized bill using a tiered
//! schedule with two consumption regimes:
//! - Low (up to 60 units): tier 1 and tier 2 rates, regime fixed charges
//! - High (above 60 units): cheaper fixed charge, tier 2 rate reused past 60 units

mod schedule;

pub use schedule::{Regime, RegimeTariff, TariffSchedule, TierRate, SRI_LANKA_DOMESTIC};

use crate::core::{BillBreakdown, Error, Result, TierCharge};

/// Pricing engine that calculates electricity bills
#[derive(Debug, Clone, Copy)]
pub struct TariffCalculator {
    schedule: &'static TariffSchedule,
}

impl TariffCalculator {
    /// Create a calculator for the given schedule
    pub fn new(schedule: &'static TariffSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'static TariffSchedule {
        self.schedule
    }

    /// Convert a monthly quantity into billing units
    pub fn units_for(&self, monthly_quantity: f64) -> f64 {
        monthly_quantity / self.schedule.quantity_per_unit
    }

    /// Compute the itemized bill for a monthly quantity
    pub fn compute_bill(&self, monthly_quantity: f64) -> Result<BillBreakdown> {
        if monthly_quantity.is_nan() || monthly_quantity < 0.0 {
            return Err(Error::InvalidInput(format!(
                "monthly quantity must be a non-negative number, got {}",
                monthly_quantity
            )));
        }

        let schedule = self.schedule;
        let units = self.units_for(monthly_quantity);
        let regime = schedule.regime_for_units(units);
        let tariff = schedule.tariff(regime);

        let mut tiers = Vec::with_capacity(3);
        let fixed_charge;

        if units <= schedule.tier1_ceiling {
            tiers.push(tier_charge(band_a_label(schedule), units, tariff.tier1.unit_charge));
            fixed_charge = tariff.tier1.fixed_charge;
        } else {
            tiers.push(tier_charge(band_a_label(schedule), schedule.tier1_ceiling, tariff.tier1.unit_charge));

            let band_b_units = units.min(schedule.tier2_ceiling) - schedule.tier1_ceiling;
            tiers.push(tier_charge(band_b_label(schedule), band_b_units, tariff.tier2.unit_charge));

            if units > schedule.tier2_ceiling {
                // Same rate as band B; the schedule has no third rate
                let band_c_units = units - schedule.tier2_ceiling;
                tiers.push(tier_charge(band_c_label(schedule), band_c_units, tariff.tier2.unit_charge));
            }

            fixed_charge = tariff.tier2.fixed_charge;
        }

        let variable_charge: f64 = tiers.iter().map(|t| t.charge_amount).sum();
        let total = variable_charge + fixed_charge;

        log::debug!(
            "Bill for {:.2} ({:.3} units, {:?} regime): {} bands, total {:.2}",
            monthly_quantity,
            units,
            regime,
            tiers.len(),
            total
        );

        Ok(BillBreakdown {
            consumption_quantity: monthly_quantity,
            units_consumed: units,
            fixed_charge,
            variable_charge,
            tiers,
            total,
        })
    }
}

impl Default for TariffCalculator {
    fn default() -> Self {
        Self::new(&SRI_LANKA_DOMESTIC)
    }
}

fn tier_charge(range_label: String, units: f64, rate: f64) -> TierCharge {
    TierCharge {
        range_label,
        units_in_tier: units,
        rate,
        charge_amount: units * rate,
    }
}

fn band_a_label(schedule: &TariffSchedule) -> String {
    format!("0-{} units", schedule.tier1_ceiling)
}

fn band_b_label(schedule: &TariffSchedule) -> String {
    format!("{}-{} units", schedule.tier1_ceiling + 1.0, schedule.tier2_ceiling)
}

fn band_c_label(schedule: &TariffSchedule) -> String {
    format!("> {} units", schedule.tier2_ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn calculator() -> TariffCalculator {
        TariffCalculator::default()
    }

    #[test]
    fn test_zero_consumption_is_fixed_charge_only() {
        let bill = calculator().compute_bill(0.0).unwrap();

        assert_eq!(bill.tiers.len(), 1);
        assert_eq!(bill.variable_charge, 0.0);
        assert_eq!(bill.fixed_charge, 30.0);
        assert_eq!(bill.total, 30.0);
    }

    #[test]
    fn test_up_to_30_units_single_band() {
        for quantity in [1.0, 12_345.0, 29_999.0, 30_000.0] {
            let bill = calculator().compute_bill(quantity).unwrap();
            assert_eq!(bill.tiers.len(), 1, "quantity {}", quantity);
            assert_eq!(bill.tiers[0].range_label, "0-30 units");
            assert_eq!(bill.fixed_charge, 30.0);
        }

        let bill = calculator().compute_bill(20_000.0).unwrap();
        assert_abs_diff_eq!(bill.units_consumed, 20.0);
        assert_abs_diff_eq!(bill.variable_charge, 50.0);
        assert_abs_diff_eq!(bill.total, 80.0);
    }

    #[test]
    fn test_60_units_is_low_regime_with_two_bands() {
        let bill = calculator().compute_bill(60_000.0).unwrap();

        assert_eq!(bill.tiers.len(), 2);
        assert_eq!(bill.tiers[0].range_label, "0-30 units");
        assert_eq!(bill.tiers[1].range_label, "31-60 units");
        assert_abs_diff_eq!(bill.tiers[1].units_in_tier, 30.0);
        assert_eq!(bill.tiers[1].rate, 5.0);
        assert_eq!(bill.fixed_charge, 60.0);
        assert_abs_diff_eq!(bill.total, 75.0 + 150.0 + 60.0);
    }

    #[test]
    fn test_45_units_partial_band_b() {
        let bill = calculator().compute_bill(45_000.0).unwrap();

        assert_eq!(bill.tiers.len(), 2);
        assert_abs_diff_eq!(bill.tiers[1].units_in_tier, 15.0);
        assert_abs_diff_eq!(bill.tiers[1].charge_amount, 75.0);
        assert_abs_diff_eq!(bill.total, 75.0 + 75.0 + 60.0);
    }

    #[test]
    fn test_90_units_high_regime_reuses_tier2_rate() {
        let bill = calculator().compute_bill(90_000.0).unwrap();

        assert_eq!(bill.tiers.len(), 3);
        let labels: Vec<_> = bill.tiers.iter().map(|t| t.range_label.as_str()).collect();
        assert_eq!(labels, vec!["0-30 units", "31-60 units", "> 60 units"]);
        assert_eq!(bill.tiers[1].rate, 4.85);
        assert_eq!(bill.tiers[2].rate, bill.tiers[1].rate);
        assert_abs_diff_eq!(bill.tiers[2].units_in_tier, 30.0);
        assert_eq!(bill.fixed_charge, 0.99);
        assert_abs_diff_eq!(bill.total, 75.0 + 145.5 + 145.5 + 0.99, epsilon = 1e-9);
    }

    #[test]
    fn test_just_above_60_units_switches_regime() {
        let bill = calculator().compute_bill(60_001.0).unwrap();

        assert_eq!(bill.fixed_charge, 0.99);
        assert_eq!(bill.tiers.len(), 3);
        assert_eq!(bill.tiers[2].range_label, "> 60 units");
        assert_abs_diff_eq!(bill.tiers[2].units_in_tier, 0.001, epsilon = 1e-9);
        assert_eq!(bill.tiers[2].rate, 4.85);
        // Low regime one unit earlier: 60.00 fixed instead of 0.99
        assert_eq!(calculator().compute_bill(60_000.0).unwrap().fixed_charge, 60.0);
    }

    #[test]
    fn test_variable_plus_fixed_is_total() {
        for quantity in [0.0, 500.0, 31_000.0, 60_001.0, 250_000.0] {
            let bill = calculator().compute_bill(quantity).unwrap();
            let bands: f64 = bill.tiers.iter().map(|t| t.charge_amount).sum();
            assert_abs_diff_eq!(bill.variable_charge, bands, epsilon = 1e-9);
            assert_abs_diff_eq!(bill.total, bands + bill.fixed_charge, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_negative_quantity_rejected() {
        assert!(matches!(calculator().compute_bill(-0.5), Err(Error::InvalidInput(_))));
        assert!(matches!(calculator().compute_bill(f64::NAN), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_regime_boundary() {
        let schedule = calculator().schedule();
        assert_eq!(schedule.regime_for_units(60.0), Regime::Low);
        assert_eq!(schedule.regime_for_units(60.0001), Regime::High);
    }
}
