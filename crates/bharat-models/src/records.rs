use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Whether a record is a single month's snapshot or a fiscal-year aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Month,
    #[default]
    Year,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Month => "month",
            PeriodType::Year => "year",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            other => Err(format!("invalid type '{other}', expected 'month' or 'year'")),
        }
    }
}

/// Cached statistics for one district over one month or one fiscal year.
///
/// Year records hold the sum of every month row seen for the same district
/// and fiscal year in the run that produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct AggregateRecord {
    pub district_code: String,
    pub district_name: String,
    pub fin_year: String,
    /// Three-letter month abbreviation; absent on year records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub approved_labour_budget: f64,
    pub persondays_central_liability: f64,
    pub total_households_worked: f64,
    pub total_jobcards_issued: f64,
}

impl AggregateRecord {
    /// Empty year aggregate, identified by the first row seen for its key.
    pub fn year(district_code: &str, district_name: &str, fin_year: &str) -> Self {
        Self {
            district_code: district_code.to_string(),
            district_name: district_name.to_string(),
            fin_year: fin_year.to_string(),
            month: None,
            period_type: PeriodType::Year,
            ..Default::default()
        }
    }

    /// Adds another record's metrics into this one.
    pub fn accumulate(&mut self, other: &AggregateRecord) {
        self.approved_labour_budget += other.approved_labour_budget;
        self.persondays_central_liability += other.persondays_central_liability;
        self.total_households_worked += other.total_households_worked;
        self.total_jobcards_issued += other.total_jobcards_issued;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_type_parsing() {
        assert_eq!("month".parse::<PeriodType>(), Ok(PeriodType::Month));
        assert_eq!("YEAR".parse::<PeriodType>(), Ok(PeriodType::Year));
        assert!("quarter".parse::<PeriodType>().is_err());
        assert_eq!(PeriodType::default(), PeriodType::Year);
    }

    #[test]
    fn test_year_record_omits_month() {
        let record = AggregateRecord::year("1810", "PUNE", "2024-2025");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "year");
        assert!(value.get("month").is_none());
        assert_eq!(value["district_code"], "1810");
    }

    #[test]
    fn test_month_record_round_trips_wire_names() {
        let json = r#"{
            "district_code": "1810",
            "district_name": "PUNE",
            "fin_year": "2024-2025",
            "month": "Jan",
            "type": "month",
            "approved_labour_budget": 10.5,
            "persondays_central_liability": 2.0,
            "total_households_worked": 3.0,
            "total_jobcards_issued": 4.0
        }"#;
        let record: AggregateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.period_type, PeriodType::Month);
        assert_eq!(record.month.as_deref(), Some("Jan"));
        assert_eq!(record.approved_labour_budget, 10.5);
    }

    #[test]
    fn test_accumulate_sums_all_metrics() {
        let mut total = AggregateRecord::year("1810", "PUNE", "2024-2025");
        let row = AggregateRecord {
            approved_labour_budget: 1.0,
            persondays_central_liability: 2.0,
            total_households_worked: 3.0,
            total_jobcards_issued: 4.0,
            ..Default::default()
        };
        total.accumulate(&row);
        total.accumulate(&row);
        assert_eq!(total.approved_labour_budget, 2.0);
        assert_eq!(total.persondays_central_liability, 4.0);
        assert_eq!(total.total_households_worked, 6.0);
        assert_eq!(total.total_jobcards_issued, 8.0);
    }
}
