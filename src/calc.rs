//! Cumulative energy and cost computation for a constant resistive load.

use serde::Serialize;

/// One row of the cumulative hour-by-hour table.
///
/// Values are cumulative from hour 1 through `hour` (`power_kw * hour`),
/// not the increment consumed during that hour alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    /// Hour number, 1-based.
    pub hour: usize,
    /// Cumulative energy through this hour (kWh).
    pub energy_kwh: f64,
    /// Cumulative cost through this hour (whole currency units).
    pub cost: f64,
}

/// Derived power, tariff rate, and cumulative consumption table.
///
/// # Examples
///
/// ```
/// use wattbill::calc::calculate_consumption;
///
/// let r = calculate_consumption(240.0, 5.0, 50.0, 24);
/// assert_eq!(r.power_kw, 1.2);
/// assert_eq!(r.rows.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionResult {
    /// Power drawn by the load (W).
    pub power_w: f64,
    /// Power drawn by the load (kW).
    pub power_kw: f64,
    /// Tariff converted to whole currency units per kWh.
    pub rate_per_kwh: f64,
    /// Cumulative table, ascending hour order, one row per hour.
    pub rows: Vec<HourRow>,
    /// Energy consumed in the first hour (kWh); equals the first row.
    pub energy_1h_kwh: f64,
    /// Cost of the first hour; equals the first row.
    pub cost_1h: f64,
    /// Energy consumed over the full period (kWh); equals the last row.
    pub energy_total_kwh: f64,
    /// Cost of the full period; equals the last row.
    pub cost_total: f64,
}

/// Computes power, per-kWh rate, and the cumulative energy/cost table.
///
/// `rate_subunits` is the tariff in currency subunits per kWh (e.g. sen/kWh)
/// and is converted to whole units by dividing by 100.
///
/// Inputs must be strictly positive and `hours >= 1`; callers validate before
/// invoking. The function itself performs no validation and has no error
/// path: it is total over its documented domain, and outside it the returned
/// table is meaningless but no failure is raised.
///
/// No rounding is applied to any stored value; display precision is a
/// rendering concern.
pub fn calculate_consumption(
    voltage: f64,
    current: f64,
    rate_subunits: f64,
    hours: usize,
) -> ConsumptionResult {
    let power_w = voltage * current;
    let power_kw = power_w / 1000.0;
    let rate_per_kwh = rate_subunits / 100.0;

    let mut rows = Vec::with_capacity(hours);
    for hour in 1..=hours {
        let energy_kwh = power_kw * hour as f64;
        rows.push(HourRow {
            hour,
            energy_kwh,
            cost: energy_kwh * rate_per_kwh,
        });
    }

    let energy_1h_kwh = power_kw * 1.0;
    let energy_total_kwh = power_kw * hours as f64;

    ConsumptionResult {
        power_w,
        power_kw,
        rate_per_kwh,
        rows,
        energy_1h_kwh,
        cost_1h: energy_1h_kwh * rate_per_kwh,
        energy_total_kwh,
        cost_total: energy_total_kwh * rate_per_kwh,
    }
}
