//! HTML presentation: escaping, display formatting, and page assembly.
//!
//! Everything here is display-only. Stored values are never mutated;
//! precision is applied at write time.

use std::fmt;

use crate::calc::ConsumptionResult;
use crate::config::BillingConfig;
use crate::web::forms::CalculatorInput;

/// Display precision for power and energy values.
pub const POWER_DECIMALS: usize = 5;
/// Display precision for currency amounts.
pub const CURRENCY_DECIMALS: usize = 4;
/// Display precision for the raw subunit tariff rate.
pub const RATE_DECIMALS: usize = 2;

/// Escapes `& < > " '` for safe interpolation into HTML text and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a value with a fixed number of decimals and comma thousands
/// grouping in the integer part (`2300.0` with 5 decimals → `2,300.00000`).
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (negative, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, frac)) => (i, Some(frac)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3);
    if negative {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Full calculator page: form, optional error alert, optional results.
///
/// Rendered through `Display` so handlers can hand the document straight to
/// `axum::response::Html`.
pub struct Page<'a> {
    /// Billing labels and hour count for display.
    pub billing: &'a BillingConfig,
    /// Parsed inputs, echoed back into the form fields.
    pub input: CalculatorInput,
    /// Validation error to show instead of results.
    pub error: Option<&'a str>,
    /// Computed result to embed, when validation passed.
    pub result: Option<&'a ConsumptionResult>,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "<!doctype html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Electricity Calculator (kWh &amp; Charges)</title>\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">\n\
             <link rel=\"stylesheet\" href=\"https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css\">\n\
             <style>\n\
             body { padding-top: 30px; }\n\
             .card { margin-bottom: 20px; }\n\
             .monospace { font-family: monospace; }\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <div class=\"container\">\n\
             <h1 class=\"mb-3\">Electricity Power &amp; Charge Calculator</h1>\n",
        )?;

        self.write_form(f)?;

        if let Some(error) = self.error {
            writeln!(
                f,
                "<div class=\"alert alert-danger\">{}</div>",
                escape_html(error)
            )?;
        }

        if let Some(result) = self.result {
            self.write_summary(f, result)?;
            self.write_table(f, result)?;
        }

        self.write_footer(f)?;

        f.write_str(
            "</div>\n\
             <script src=\"https://code.jquery.com/jquery-3.5.1.slim.min.js\"></script>\n\
             <script src=\"https://cdn.jsdelivr.net/npm/bootstrap@4.5.2/dist/js/bootstrap.bundle.min.js\"></script>\n\
             </body>\n\
             </html>\n",
        )
    }
}

impl Page<'_> {
    fn write_form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub = escape_html(&self.billing.subunit_label);
        let cur = escape_html(&self.billing.currency_label);

        f.write_str(
            "<div class=\"card\">\n\
             <div class=\"card-body\">\n\
             <form method=\"post\" action=\"/\" novalidate>\n\
             <div class=\"form-row\">\n",
        )?;
        writeln!(
            f,
            "<div class=\"form-group col-md-4\">\n\
             <label>Voltage (V)</label>\n\
             <input name=\"voltage\" type=\"number\" step=\"0.01\" class=\"form-control\" value=\"{}\" required>\n\
             </div>",
            self.input.voltage
        )?;
        writeln!(
            f,
            "<div class=\"form-group col-md-4\">\n\
             <label>Current (A)</label>\n\
             <input name=\"current\" type=\"number\" step=\"0.01\" class=\"form-control\" value=\"{}\" required>\n\
             </div>",
            self.input.current
        )?;
        writeln!(
            f,
            "<div class=\"form-group col-md-4\">\n\
             <label>Current Rate ({sub} / kWh)</label>\n\
             <input name=\"rate\" type=\"number\" step=\"0.01\" class=\"form-control\" value=\"{}\" required>\n\
             </div>",
            self.input.rate_subunits
        )?;
        f.write_str(
            "</div>\n\
             <button type=\"submit\" class=\"btn btn-primary\">Calculate</button>\n",
        )?;
        writeln!(
            f,
            "<small class=\"form-text text-muted mt-2\">\n\
             Enter rate in <strong>{sub}/kWh</strong> (e.g. 21.80). This converts to {cur} by dividing by 100.\n\
             </small>"
        )?;
        f.write_str("</form>\n</div>\n</div>\n")
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>, result: &ConsumptionResult) -> fmt::Result {
        let sub = escape_html(&self.billing.subunit_label);
        let cur = escape_html(&self.billing.currency_label);
        let hours = self.billing.hours;

        f.write_str("<div class=\"card\">\n<div class=\"card-body\">\n<h5>Summary</h5>\n")?;
        writeln!(
            f,
            "<p class=\"mb-1\"><strong>Power:</strong> {} W ({} kW)</p>",
            format_grouped(result.power_w, POWER_DECIMALS),
            format_grouped(result.power_kw, POWER_DECIMALS)
        )?;
        writeln!(
            f,
            "<p class=\"mb-1\"><strong>Rate:</strong> {} {sub}/kWh = {cur} {}/kWh</p>",
            format_grouped(self.input.rate_subunits, RATE_DECIMALS),
            format_grouped(result.rate_per_kwh, CURRENCY_DECIMALS)
        )?;
        writeln!(
            f,
            "<p class=\"mb-0\"><strong>Energy in 1 hour:</strong> {} kWh &nbsp; | &nbsp; \
             <strong>Cost for 1 hour:</strong> {cur} {}</p>",
            format_grouped(result.energy_1h_kwh, POWER_DECIMALS),
            format_grouped(result.cost_1h, CURRENCY_DECIMALS)
        )?;
        f.write_str("<hr>\n")?;
        writeln!(
            f,
            "<p class=\"mb-0\"><strong>Energy in {hours} hours:</strong> {} kWh &nbsp; | &nbsp; \
             <strong>Total cost for {hours} hours:</strong> {cur} {}</p>",
            format_grouped(result.energy_total_kwh, POWER_DECIMALS),
            format_grouped(result.cost_total, CURRENCY_DECIMALS)
        )?;
        f.write_str("</div>\n</div>\n")
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>, result: &ConsumptionResult) -> fmt::Result {
        let cur = escape_html(&self.billing.currency_label);

        f.write_str(
            "<div class=\"card\">\n\
             <div class=\"card-body table-responsive\">\n\
             <h5>Hour-by-hour table (cumulative)</h5>\n\
             <table class=\"table table-sm table-striped table-bordered\">\n\
             <thead>\n<tr>\n<th>Hour</th>\n<th>Energy (kWh)</th>\n",
        )?;
        writeln!(f, "<th>Total ({cur})</th>")?;
        f.write_str("</tr>\n</thead>\n<tbody>\n")?;
        for row in &result.rows {
            writeln!(
                f,
                "<tr>\n<td class=\"monospace\">{}</td>\n\
                 <td class=\"monospace\">{}</td>\n\
                 <td class=\"monospace\">{}</td>\n</tr>",
                row.hour,
                format_grouped(row.energy_kwh, POWER_DECIMALS),
                format_grouped(row.cost, CURRENCY_DECIMALS)
            )?;
        }
        f.write_str("</tbody>\n</table>\n</div>\n</div>\n")
    }

    fn write_footer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = escape_html(&self.billing.currency_label);
        writeln!(
            f,
            "<footer class=\"text-muted small\">\n\
             <p>Formulas used:\n\
             Power (W) = Voltage (V) &times; Current (A) &rarr; convert to kW by dividing by 1000.\n\
             Energy (kWh) = Power (kW) &times; Hours.\n\
             Total ({cur}) = Energy (kWh) &times; (Rate in {cur}/kWh).</p>\n\
             <p>Check your utility&#39;s current residential tariff before entering the rate.</p>\n\
             </footer>"
        )
    }
}
