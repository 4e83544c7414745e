use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{assigned, datetime};
use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

/// A student's request for help during a lab or breakout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequest {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub solved: bool,
    pub explanation: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub request_time: NaiveDateTime,
}

impl Entity for HelpRequest {
    type Key = i64;
    const NAME: &'static str = "HelpRequest";

    fn key(&self) -> Option<i64> {
        assigned(self.id)
    }

    fn with_key(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl PgEntity for HelpRequest {
    const TABLE: &'static str = "helprequests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "team_id",
        "table_or_breakout_room",
        "request_time",
        "explanation",
        "solved",
    ];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS helprequests (
        id BIGSERIAL PRIMARY KEY,
        requester_email TEXT NOT NULL,
        team_id TEXT NOT NULL,
        table_or_breakout_room TEXT NOT NULL,
        request_time TIMESTAMP NOT NULL,
        explanation TEXT NOT NULL,
        solved BOOLEAN NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.requester_email)
            .bind(&self.team_id)
            .bind(&self.table_or_breakout_room)
            .bind(self.request_time)
            .bind(&self.explanation)
            .bind(self.solved)
    }
}

impl RestEntity for HelpRequest {
    const BASE_PATH: &'static str = "/api/helprequest";
    type CreateParams = CreateHelpRequest;

    fn from_params(params: CreateHelpRequest) -> Self {
        tracing::info!(request_time = %params.request_time, "new help request");
        Self {
            id: 0,
            requester_email: params.requester_email,
            team_id: params.team_id,
            table_or_breakout_room: params.table_or_breakout_room,
            request_time: params.request_time,
            explanation: params.explanation,
            solved: params.solved,
        }
    }
}
