use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Expected demand for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOutlook {
    pub month: u32,
    pub label: &'static str,
    /// Multiplier against baseline demand; 1.0 is an average month.
    pub demand_factor: f64,
    pub driver: &'static str,
}

/// Seasonality report for sales planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityReport {
    pub generated_for: NaiveDate,
    pub current_month: MonthOutlook,
    pub peak_months: Vec<&'static str>,
    pub months: Vec<MonthOutlook>,
    pub recommendation: String,
}

// Coastal vacation months empty residential buildings and push burglary risk
// (and demand for access control) up; July school holidays are a smaller
// version of the same effect.
const MONTHLY_DEMAND: &[(u32, &str, f64, &str)] = &[
    (1, "January", 1.35, "summer vacations leave units unattended"),
    (2, "February", 1.15, "carnival travel peak"),
    (3, "March", 0.95, "post-season lull"),
    (4, "April", 0.90, "baseline demand"),
    (5, "May", 0.90, "baseline demand"),
    (6, "June", 0.95, "budget planning for mid-year contracts"),
    (7, "July", 1.20, "school holidays raise residential vacancy"),
    (8, "August", 0.95, "baseline demand"),
    (9, "September", 1.00, "condominium assembly season begins"),
    (10, "October", 1.05, "budget approvals for next-year contracts"),
    (11, "November", 1.10, "pre-season security upgrades"),
    (12, "December", 1.40, "year-end travel and vacancy peak"),
];

fn outlook(month: u32) -> MonthOutlook {
    let (month, label, demand_factor, driver) = MONTHLY_DEMAND
        .iter()
        .copied()
        .find(|entry| entry.0 == month)
        .unwrap_or((month, "Unknown", 1.0, "baseline demand"));
    MonthOutlook {
        month,
        label,
        demand_factor,
        driver,
    }
}

/// Fixed reference table; a pure function of the supplied date.
pub fn seasonality_report(today: NaiveDate) -> SeasonalityReport {
    let months: Vec<MonthOutlook> = MONTHLY_DEMAND
        .iter()
        .map(|entry| outlook(entry.0))
        .collect();

    let peak_months: Vec<&'static str> = months
        .iter()
        .filter(|entry| entry.demand_factor >= 1.2)
        .map(|entry| entry.label)
        .collect();

    let current_month = outlook(today.month());
    let recommendation = if current_month.demand_factor >= 1.2 {
        format!(
            "{} is a peak month ({}); front-load visits to residential zones",
            current_month.label, current_month.driver
        )
    } else if current_month.demand_factor >= 1.0 {
        format!(
            "{} carries average-or-better demand; keep the standard visit cadence",
            current_month.label
        )
    } else {
        format!(
            "{} is below baseline; use the slack for pipeline hygiene and referrals",
            current_month.label
        )
    };

    SeasonalityReport {
        generated_for: today,
        current_month,
        peak_months,
        months,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn december_is_the_peak() {
        let report = seasonality_report(NaiveDate::from_ymd_opt(2026, 12, 10).expect("valid date"));
        assert_eq!(report.current_month.label, "December");
        assert!(report.current_month.demand_factor > 1.3);
        assert!(report.peak_months.contains(&"December"));
        assert!(report.peak_months.contains(&"January"));
        assert!(report.recommendation.contains("peak"));
    }

    #[test]
    fn report_covers_all_twelve_months() {
        let report = seasonality_report(NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date"));
        assert_eq!(report.months.len(), 12);
        assert!(report.current_month.demand_factor < 1.0);
    }

    #[test]
    fn report_serializes_month_labels_as_strings() {
        let report = seasonality_report(NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"));
        let value = serde_json::to_value(&report).expect("serializable report");
        assert_eq!(value["current_month"]["label"], "January");
        assert_eq!(value["peak_months"][0], "January");
        assert_eq!(value["months"].as_array().expect("months").len(), 12);
    }

    #[test]
    fn same_date_produces_identical_report() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 15).expect("valid date");
        assert_eq!(seasonality_report(date), seasonality_report(date));
    }
}
