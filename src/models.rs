use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Goal-status payload as the backend emits it: camelCase fields,
/// dates as `[year, month, day]` arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetailsPayload {
    pub goal_name: String,
    pub goal_summary_message: String,
    pub unit: String,
    pub status_string: String,
    pub status: GoalStatus,
    pub event_model_list: Vec<EventModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub sum: f64,
    pub status_message: String,
    pub event_summary_list: Vec<EventSummary>,
}

/// One day of the rolling evaluation window, zero-valued days included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(with = "date_triple")]
    pub date: NaiveDate,
    pub summed_measurement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventModel {
    pub goal_id: String,
    pub event_id: Uuid,
    #[serde(with = "date_triple")]
    pub date_of_event: NaiveDate,
    pub measurement: f64,
}

impl GoalDetailsPayload {
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Stored goal definition.
#[derive(Debug, Clone)]
pub struct GoalRecord {
    pub user_id: String,
    pub goal_name: String,
    pub target: f64,
    pub time_period: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    InMomentum,
    OnTrack,
    Behind,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusLabel::InMomentum => "In Momentum",
            StatusLabel::OnTrack => "On Track",
            StatusLabel::Behind => "Behind",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub status_label: String,
    pub aggregate_text: String,
    pub message_text: String,
    pub goal_message: String,
}

/// Display-ready table row, rebuilt wholesale on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub weekday: &'static str,
    pub formatted_date: String,
    pub display_value: String,
    pub value: f64,
    pub is_zero: bool,
    pub is_last_row: bool,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid calendar date [{year}, {month}, {day}] in goal payload")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("malformed goal payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Wire format for dates: a `[year, month, day]` array. Impossible
/// triples are rejected here so the rest of the pipeline only ever
/// sees valid calendar dates.
pub mod date_triple {
    use chrono::{Datelike, NaiveDate};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::PayloadError;

    pub fn resolve(year: i32, month: u32, day: u32) -> Result<NaiveDate, PayloadError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(PayloadError::InvalidDate { year, month, day })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        (date.year(), date.month(), date.day()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let (year, month, day) = <(i32, u32, u32)>::deserialize(deserializer)?;
        resolve(year, month, day).map_err(D::Error::custom)
    }
}

#[cfg(test)]
pub(crate) fn demo_payload() -> GoalDetailsPayload {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let summaries = vec![
        (date(2023, 9, 9), 0.0),
        (date(2023, 9, 8), 140.0),
        (date(2023, 9, 7), 0.0),
        (date(2023, 9, 6), 35.0),
        (date(2023, 9, 5), 65.0),
        (date(2023, 9, 4), 0.0),
        (date(2023, 9, 3), 0.0),
        (date(2023, 9, 2), 0.0),
    ];
    let events = vec![
        ("ace7dde3-6a10-4ce1-beca-e4c2fcbfa044", date(2023, 9, 5), 65.0),
        ("47abf438-204c-4b7a-8be4-13f262680f3d", date(2023, 9, 6), 35.0),
        ("d57af852-fdde-4931-9a7b-437c3c233ede", date(2023, 9, 8), 140.0),
    ];
    GoalDetailsPayload {
        goal_name: "Run".to_string(),
        goal_summary_message: "Target: 150 minutes within a rolling 7 day period.".to_string(),
        unit: "minutes".to_string(),
        status_string: "In Momentum".to_string(),
        status: GoalStatus {
            sum: 240.0,
            status_message: "You have a surplus of 90 minutes. Keep it up!".to_string(),
            event_summary_list: summaries
                .into_iter()
                .map(|(date, summed_measurement)| EventSummary {
                    date,
                    summed_measurement,
                })
                .collect(),
        },
        event_model_list: events
            .into_iter()
            .map(|(id, date_of_event, measurement)| EventModel {
                goal_id: "griffin.scott88@gmail.comRun".to_string(),
                event_id: Uuid::parse_str(id).unwrap(),
                date_of_event,
                measurement,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_through_wire_format() {
        let payload = demo_payload();
        let raw = serde_json::to_string(&payload).unwrap();

        assert!(raw.contains("\"goalName\":\"Run\""));
        assert!(raw.contains("\"summedMeasurement\""));
        assert!(raw.contains("[2023,9,9]"));

        let parsed = GoalDetailsPayload::from_json(&raw).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn deserializes_backend_response_shape() {
        let raw = r#"{
            "goalName": "Run",
            "goalSummaryMessage": "Target: 150 minutes within a rolling 7 day period.",
            "unit": "minutes",
            "statusString": "In Momentum",
            "status": {
                "sum": 240.0,
                "statusMessage": "You have a surplus of 90 minutes. Keep it up!",
                "eventSummaryList": [
                    { "date": [2023, 9, 9], "summedMeasurement": 0.0 },
                    { "date": [2023, 9, 8], "summedMeasurement": 140.0 }
                ]
            },
            "eventModelList": [
                {
                    "goalId": "griffin.scott88@gmail.comRun",
                    "eventId": "ace7dde3-6a10-4ce1-beca-e4c2fcbfa044",
                    "dateOfEvent": [2023, 9, 5],
                    "measurement": 65.0
                }
            ]
        }"#;

        let payload = GoalDetailsPayload::from_json(raw).unwrap();
        assert_eq!(payload.goal_name, "Run");
        assert_eq!(payload.status.event_summary_list.len(), 2);
        assert_eq!(
            payload.event_model_list[0].date_of_event,
            NaiveDate::from_ymd_opt(2023, 9, 5).unwrap()
        );
    }

    #[test]
    fn rejects_impossible_date_triples() {
        let error = date_triple::resolve(2023, 2, 30).unwrap_err();
        assert!(matches!(
            error,
            PayloadError::InvalidDate {
                year: 2023,
                month: 2,
                day: 30
            }
        ));

        let raw = r#"{ "date": [2023, 2, 30], "summedMeasurement": 1.0 }"#;
        let result: Result<EventSummary, _> = serde_json::from_str(raw);
        assert!(result.unwrap_err().to_string().contains("invalid calendar date"));
    }
}
