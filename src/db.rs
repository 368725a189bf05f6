use anyhow::Context;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::client::{GoalService, ServiceError};
use crate::models::{EventModel, GoalDetailsPayload, GoalRecord};
use crate::status;

pub const DEMO_USER: &str = "griffin.scott88@gmail.com";

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO momentum.goals (user_id, goal_name, target, time_period, unit)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, goal_name) DO UPDATE
        SET target = EXCLUDED.target, time_period = EXCLUDED.time_period, unit = EXCLUDED.unit
        "#,
    )
    .bind(DEMO_USER)
    .bind("Run")
    .bind(150.0_f64)
    .bind(7_i64)
    .bind("minutes")
    .execute(pool)
    .await?;

    let events = vec![
        (
            "seed-001",
            NaiveDate::from_ymd_opt(2023, 9, 5).context("invalid date")?,
            65.0_f64,
        ),
        (
            "seed-002",
            NaiveDate::from_ymd_opt(2023, 9, 6).context("invalid date")?,
            35.0_f64,
        ),
        (
            "seed-003",
            NaiveDate::from_ymd_opt(2023, 9, 8).context("invalid date")?,
            140.0_f64,
        ),
    ];

    for (source_key, date_of_event, measurement) in events {
        sqlx::query(
            r#"
            INSERT INTO momentum.events
            (id, user_id, goal_name, date_of_event, measurement, source_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(DEMO_USER)
        .bind("Run")
        .bind(date_of_event)
        .bind(measurement)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        user_id: String,
        goal_name: String,
        date_of_event: NaiveDate,
        measurement: f64,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO momentum.events
            (id, user_id, goal_name, date_of_event, measurement, source_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&row.user_id)
        .bind(&row.goal_name)
        .bind(row.date_of_event)
        .bind(row.measurement)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

pub async fn fetch_goal(
    pool: &PgPool,
    user_id: &str,
    goal_name: &str,
) -> Result<Option<GoalRecord>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT user_id, goal_name, target, time_period, unit \
         FROM momentum.goals WHERE user_id = $1 AND goal_name = $2",
    )
    .bind(user_id)
    .bind(goal_name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| GoalRecord {
        user_id: row.get("user_id"),
        goal_name: row.get("goal_name"),
        target: row.get("target"),
        time_period: row.get("time_period"),
        unit: row.get("unit"),
    }))
}

pub async fn fetch_events(pool: &PgPool, goal: &GoalRecord) -> Result<Vec<EventModel>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, date_of_event, measurement \
         FROM momentum.events WHERE user_id = $1 AND goal_name = $2 \
         ORDER BY date_of_event",
    )
    .bind(&goal.user_id)
    .bind(&goal.goal_name)
    .fetch_all(pool)
    .await?;

    let goal_id = format!("{}{}", goal.user_id, goal.goal_name);
    let events = rows
        .into_iter()
        .map(|row| EventModel {
            goal_id: goal_id.clone(),
            event_id: row.get("id"),
            date_of_event: row.get("date_of_event"),
            measurement: row.get("measurement"),
        })
        .collect();

    Ok(events)
}

/// Postgres-backed fetch collaborator, bound to one user the way the
/// real client is bound to the signed-in account.
pub struct PgGoalService {
    pool: PgPool,
    user_id: String,
}

impl PgGoalService {
    pub fn new(pool: PgPool, user_id: impl Into<String>) -> Self {
        Self {
            pool,
            user_id: user_id.into(),
        }
    }
}

impl GoalService for PgGoalService {
    async fn get_goal_details(&self, goal_name: &str) -> Result<GoalDetailsPayload, ServiceError> {
        let goal = fetch_goal(&self.pool, &self.user_id, goal_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(goal_name.to_string()))?;
        let events = fetch_events(&self.pool, &goal).await?;
        Ok(status::payload_for(&goal, events, Utc::now().date_naive()))
    }
}
