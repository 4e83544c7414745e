use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{assigned, datetime};
use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_requested: NaiveDateTime,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_requested: NaiveDateTime,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl Entity for RecommendationRequest {
    type Key = i64;
    const NAME: &'static str = "RecommendationRequest";

    fn key(&self) -> Option<i64> {
        assigned(self.id)
    }

    fn with_key(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl PgEntity for RecommendationRequest {
    const TABLE: &'static str = "recommendationrequests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "professor_email",
        "explanation",
        "date_requested",
        "date_needed",
        "done",
    ];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS recommendationrequests (
        id BIGSERIAL PRIMARY KEY,
        requester_email TEXT NOT NULL,
        professor_email TEXT NOT NULL,
        explanation TEXT NOT NULL,
        date_requested TIMESTAMP NOT NULL,
        date_needed TIMESTAMP NOT NULL,
        done BOOLEAN NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.requester_email)
            .bind(&self.professor_email)
            .bind(&self.explanation)
            .bind(self.date_requested)
            .bind(self.date_needed)
            .bind(self.done)
    }
}

impl RestEntity for RecommendationRequest {
    const BASE_PATH: &'static str = "/api/recommendationrequest";
    type CreateParams = CreateRecommendationRequest;

    fn from_params(params: CreateRecommendationRequest) -> Self {
        Self {
            id: 0,
            requester_email: params.requester_email,
            professor_email: params.professor_email,
            explanation: params.explanation,
            date_requested: params.date_requested,
            date_needed: params.date_needed,
            done: params.done,
        }
    }
}
