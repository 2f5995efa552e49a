// Chart payload domain model
use serde::{Deserialize, Serialize};

/// Aggregated dashboard data as reported by the server.
///
/// All amounts are currency minor units. Arrays are positionally aligned:
/// `daily_labels[i]` pairs with `daily_current[i]` and `daily_previous[i]`,
/// `staff_labels[i]` with `staff_totals[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub daily_labels: Vec<String>,
    pub daily_current: Vec<i64>,
    pub daily_previous: Vec<i64>,
    pub staff_labels: Vec<String>,
    pub staff_totals: Vec<i64>,
}

/// Tips time series: current and previous period over one label axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeries<'a> {
    pub labels: &'a [String],
    pub current: &'a [i64],
    pub previous: &'a [i64],
}

/// Per-staff totals for the bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffSeries<'a> {
    pub labels: &'a [String],
    pub totals: &'a [i64],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{dataset}: {field} has {actual} entries, expected {expected}")]
pub struct Misalignment {
    pub dataset: &'static str,
    pub field: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl ChartPayload {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn daily(&self) -> Result<DailySeries<'_>, Misalignment> {
        let expected = self.daily_labels.len();
        check_len("daily", "daily_current", expected, self.daily_current.len())?;
        check_len("daily", "daily_previous", expected, self.daily_previous.len())?;
        Ok(DailySeries {
            labels: &self.daily_labels,
            current: &self.daily_current,
            previous: &self.daily_previous,
        })
    }

    pub fn staff(&self) -> Result<StaffSeries<'_>, Misalignment> {
        check_len(
            "staff",
            "staff_totals",
            self.staff_labels.len(),
            self.staff_totals.len(),
        )?;
        Ok(StaffSeries {
            labels: &self.staff_labels,
            totals: &self.staff_totals,
        })
    }
}

fn check_len(
    dataset: &'static str,
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), Misalignment> {
    if expected == actual {
        Ok(())
    } else {
        Err(Misalignment {
            dataset,
            field,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_payload() -> ChartPayload {
    ChartPayload {
        daily_labels: vec!["Mon".to_string(), "Tue".to_string()],
        daily_current: vec![1000, 2000],
        daily_previous: vec![500, 1500],
        staff_labels: vec!["Alice".to_string()],
        staff_totals: vec![3000],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_document() {
        let text = r#"{"daily_labels":["Mon","Tue"],"daily_current":[1000,2000],
            "daily_previous":[500,1500],"staff_labels":["Alice"],"staff_totals":[3000]}"#;
        let payload = ChartPayload::from_json(text).unwrap();
        assert_eq!(payload, sample_payload());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let text =
            r#"{"daily_labels":[],"daily_current":[],"daily_previous":[],"staff_labels":[]}"#;
        assert!(ChartPayload::from_json(text).is_err());
    }

    #[test]
    fn test_daily_misalignment() {
        let mut payload = sample_payload();
        payload.daily_previous.pop();

        let err = payload.daily().unwrap_err();
        assert_eq!(err.field, "daily_previous");
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
        // staff section is unaffected
        assert!(payload.staff().is_ok());
    }

    #[test]
    fn test_staff_misalignment() {
        let mut payload = sample_payload();
        payload.staff_totals.push(10);

        assert!(payload.staff().is_err());
        assert_eq!(payload.daily().unwrap().labels.len(), 2);
    }
}
