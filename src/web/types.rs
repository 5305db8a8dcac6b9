//! JSON API query and response types.

use serde::{Deserialize, Serialize};

use crate::calc::{ConsumptionResult, HourRow};

/// Query parameters for the consumption endpoints.
///
/// Values arrive as raw strings so the same lenient decimal parsing applies
/// to the API and the HTML form.
#[derive(Debug, Default, Deserialize)]
pub struct ConsumptionQuery {
    pub voltage: Option<String>,
    pub current: Option<String>,
    pub rate: Option<String>,
}

/// One hour of the cumulative table in the API contract.
#[derive(Debug, Serialize)]
pub struct HourRowRecord {
    /// Hour number, 1-based.
    pub hour: usize,
    /// Cumulative energy through this hour (kWh).
    pub energy_kwh: f64,
    /// Cumulative cost through this hour (whole currency units).
    pub cost: f64,
}

impl From<&HourRow> for HourRowRecord {
    fn from(row: &HourRow) -> Self {
        Self {
            hour: row.hour,
            energy_kwh: row.energy_kwh,
            cost: row.cost,
        }
    }
}

/// Complete consumption response: derived power and rate, summaries, and the
/// cumulative hour table.
#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    /// Power drawn by the load (W).
    pub power_w: f64,
    /// Power drawn by the load (kW).
    pub power_kw: f64,
    /// Tariff in whole currency units per kWh.
    pub rate_per_kwh: f64,
    /// Number of hours covered by the table.
    pub hours: usize,
    /// Energy consumed in the first hour (kWh).
    pub energy_1h_kwh: f64,
    /// Cost of the first hour.
    pub cost_1h: f64,
    /// Energy consumed over the full period (kWh).
    pub energy_total_kwh: f64,
    /// Cost of the full period.
    pub cost_total: f64,
    /// Cumulative table, ascending hour order.
    pub rows: Vec<HourRowRecord>,
}

impl From<&ConsumptionResult> for ConsumptionResponse {
    fn from(r: &ConsumptionResult) -> Self {
        Self {
            power_w: r.power_w,
            power_kw: r.power_kw,
            rate_per_kwh: r.rate_per_kwh,
            hours: r.rows.len(),
            energy_1h_kwh: r.energy_1h_kwh,
            cost_1h: r.cost_1h,
            energy_total_kwh: r.energy_total_kwh,
            cost_total: r.cost_total,
            rows: r.rows.iter().map(HourRowRecord::from).collect(),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate_consumption;

    #[test]
    fn response_from_result_maps_fields() {
        let result = calculate_consumption(240.0, 5.0, 50.0, 24);
        let response = ConsumptionResponse::from(&result);

        assert_eq!(response.power_w, result.power_w);
        assert_eq!(response.power_kw, result.power_kw);
        assert_eq!(response.rate_per_kwh, result.rate_per_kwh);
        assert_eq!(response.hours, 24);
        assert_eq!(response.energy_total_kwh, result.energy_total_kwh);
        assert_eq!(response.cost_total, result.cost_total);
        assert_eq!(response.rows.len(), 24);
        assert_eq!(response.rows[0].hour, 1);
        assert_eq!(response.rows[0].energy_kwh, result.rows[0].energy_kwh);
        assert_eq!(response.rows[23].cost, result.rows[23].cost);
    }
}
