use chrono::{Duration, NaiveDate};

use crate::models::{
    EventModel, EventSummary, GoalDetailsPayload, GoalRecord, GoalStatus, StatusLabel,
};

/// Evaluate a goal over its rolling window ending at `today`. The
/// window covers `time_period + 1` calendar days (today inclusive) and
/// the summaries come back newest first, one per day, zeros included.
pub fn evaluate(goal: &GoalRecord, events: &[EventModel], today: NaiveDate) -> (StatusLabel, GoalStatus) {
    let window_start = today - Duration::days(goal.time_period.max(1));

    let mut event_summary_list = Vec::new();
    let mut sum = 0.0;
    let mut day = today;
    while day >= window_start {
        let summed_measurement: f64 = events
            .iter()
            .filter(|event| event.date_of_event == day)
            .map(|event| event.measurement)
            .sum();
        sum += summed_measurement;
        event_summary_list.push(EventSummary {
            date: day,
            summed_measurement,
        });
        day = day - Duration::days(1);
    }

    let (label, status_message) = classify(sum, goal);
    (
        label,
        GoalStatus {
            sum,
            status_message,
            event_summary_list,
        },
    )
}

fn classify(sum: f64, goal: &GoalRecord) -> (StatusLabel, String) {
    if sum >= goal.target {
        (
            StatusLabel::InMomentum,
            format!(
                "You have a surplus of {:.0} {}. Keep it up!",
                sum - goal.target,
                goal.unit
            ),
        )
    } else if sum >= goal.target / 2.0 {
        (
            StatusLabel::OnTrack,
            format!(
                "You need {:.0} more {} to hit your target.",
                goal.target - sum,
                goal.unit
            ),
        )
    } else {
        (
            StatusLabel::Behind,
            format!(
                "You are {:.0} {} behind your target. Time to get moving!",
                goal.target - sum,
                goal.unit
            ),
        )
    }
}

pub fn summary_message(goal: &GoalRecord) -> String {
    format!(
        "Target: {:.0} {} within a rolling {} day period.",
        goal.target, goal.unit, goal.time_period
    )
}

/// Assemble the full wire payload for a goal from its stored record
/// and raw entries.
pub fn payload_for(goal: &GoalRecord, events: Vec<EventModel>, today: NaiveDate) -> GoalDetailsPayload {
    let (label, status) = evaluate(goal, &events, today);
    GoalDetailsPayload {
        goal_name: goal.goal_name.clone(),
        goal_summary_message: summary_message(goal),
        unit: goal.unit.clone(),
        status_string: label.to_string(),
        status,
        event_model_list: events,
    }
}
