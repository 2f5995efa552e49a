// Tip ledger domain model and chart aggregation
use super::payload::ChartPayload;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipStatus {
    #[default]
    Recorded,
    Pending,
    Refunded,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffMember {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tip {
    #[serde(default)]
    pub staff_id: Option<u64>,
    pub amount_cents: i64,
    #[serde(default)]
    pub status: TipStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TipLedger {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub tips: Vec<Tip>,
}

impl TipLedger {
    /// Build the dashboard payload as seen on `today` (UTC date).
    pub fn chart_payload(&self, today: NaiveDate) -> ChartPayload {
        let (cur_year, cur_month) = (today.year(), today.month());
        let (prev_year, prev_month) = previous_month(cur_year, cur_month);

        let daily_current = self.daily_totals(cur_year, cur_month);
        let mut daily_previous = self.daily_totals(prev_year, prev_month);
        daily_previous.resize(daily_current.len(), 0);

        let daily_labels = (1..=daily_current.len()).map(|d| d.to_string()).collect();

        let totals = self.totals_by_staff();
        let mut active: Vec<&StaffMember> = self.staff.iter().filter(|s| s.active).collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));

        ChartPayload {
            daily_labels,
            daily_current,
            daily_previous,
            staff_labels: active.iter().map(|s| s.name.clone()).collect(),
            staff_totals: active
                .iter()
                .map(|s| totals.get(&s.id).copied().unwrap_or(0))
                .collect(),
        }
    }

    fn recorded(&self) -> impl Iterator<Item = &Tip> {
        self.tips.iter().filter(|t| t.status == TipStatus::Recorded)
    }

    fn daily_totals(&self, year: i32, month: u32) -> Vec<i64> {
        let mut totals: Vec<i64> = vec![0; days_in_month(year, month) as usize];
        for tip in self.recorded() {
            let date = tip.created_at.date();
            if date.year() == year && date.month() == month {
                let day = &mut totals[date.day0() as usize];
                *day = day.saturating_add(tip.amount_cents);
            }
        }
        totals
    }

    fn totals_by_staff(&self) -> HashMap<u64, i64> {
        let mut totals = HashMap::new();
        for tip in self.recorded() {
            if let Some(staff_id) = tip.staff_id {
                let total = totals.entry(staff_id).or_insert(0i64);
                *total = total.saturating_add(tip.amount_cents);
            }
        }
        totals
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tip(staff_id: Option<u64>, amount_cents: i64, created_at: NaiveDateTime) -> Tip {
        Tip {
            staff_id,
            amount_cents,
            status: TipStatus::Recorded,
            created_at,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_daily_series_aligns_previous_month() {
        let ledger = TipLedger {
            staff: vec![],
            tips: vec![
                tip(None, 500, at(2024, 3, 1)),
                tip(None, 250, at(2024, 3, 1)),
                tip(None, 900, at(2024, 3, 30)),
                tip(None, 100, at(2024, 2, 29)),
                tip(None, 700, at(2024, 2, 2)),
            ],
        };

        // April has 30 days, March 31: previous is truncated to 30.
        let payload = ledger.chart_payload(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(payload.daily_labels.len(), 30);
        assert_eq!(payload.daily_labels[0], "1");
        assert_eq!(payload.daily_previous.len(), 30);
        assert_eq!(payload.daily_previous[0], 750);
        assert_eq!(payload.daily_previous[29], 900);
        assert!(payload.daily_current.iter().all(|v| *v == 0));

        // March has 31 days, February 29: previous is zero padded.
        let payload = ledger.chart_payload(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(payload.daily_current[0], 750);
        assert_eq!(payload.daily_previous[1], 700);
        assert_eq!(payload.daily_previous[28], 100);
        assert_eq!(payload.daily_previous[30], 0);
        assert!(payload.daily().is_ok());
    }

    #[test]
    fn test_january_compares_with_december() {
        let ledger = TipLedger {
            staff: vec![],
            tips: vec![tip(None, 1200, at(2023, 12, 31))],
        };
        let payload = ledger.chart_payload(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(payload.daily_previous[30], 1200);
    }

    #[test]
    fn test_staff_totals_only_active_sorted() {
        let ledger = TipLedger {
            staff: vec![
                StaffMember { id: 1, name: "Zoe".to_string(), active: true },
                StaffMember { id: 2, name: "Alice".to_string(), active: true },
                StaffMember { id: 3, name: "Bob".to_string(), active: false },
            ],
            tips: vec![
                tip(Some(1), 300, at(2024, 1, 3)),
                tip(Some(2), 1000, at(2023, 6, 1)),
                tip(Some(3), 800, at(2024, 1, 3)),
                Tip {
                    status: TipStatus::Refunded,
                    ..tip(Some(1), 5000, at(2024, 1, 4))
                },
            ],
        };
        let payload = ledger.chart_payload(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(payload.staff_labels, vec!["Alice", "Zoe"]);
        assert_eq!(payload.staff_totals, vec![1000, 300]);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let ledger = TipLedger {
            staff: vec![StaffMember { id: 1, name: "Alice".to_string(), active: true }],
            tips: vec![
                tip(Some(1), i64::MAX, at(2024, 1, 3)),
                tip(Some(1), i64::MAX, at(2024, 1, 3)),
            ],
        };
        let payload = ledger.chart_payload(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(payload.daily_current[2], i64::MAX);
        assert_eq!(payload.staff_totals, vec![i64::MAX]);
    }

    #[test]
    fn test_parse_ledger_document() {
        let text = r#"{
            "staff": [{"id": 1, "name": "Alice"}],
            "tips": [{"staff_id": 1, "amount_cents": 250, "created_at": "2024-05-02T19:30:00"}]
        }"#;
        let ledger: TipLedger = serde_json::from_str(text).unwrap();
        assert!(ledger.staff[0].active);
        assert_eq!(ledger.tips[0].status, TipStatus::Recorded);
    }
}
