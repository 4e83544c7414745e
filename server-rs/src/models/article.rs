use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{assigned, datetime};
use crate::error::{AppError, AppResult};
use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

pub const MAX_URL_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_added: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_added: NaiveDateTime,
}

impl Entity for Article {
    type Key = i64;
    const NAME: &'static str = "Articles";

    fn key(&self) -> Option<i64> {
        assigned(self.id)
    }

    fn with_key(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl PgEntity for Article {
    const TABLE: &'static str = "articles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["title", "url", "explanation", "email", "date_added"];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS articles (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        url VARCHAR(500) NOT NULL,
        explanation TEXT NOT NULL,
        email TEXT NOT NULL,
        date_added TIMESTAMP NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.title)
            .bind(&self.url)
            .bind(&self.explanation)
            .bind(&self.email)
            .bind(self.date_added)
    }
}

impl RestEntity for Article {
    const BASE_PATH: &'static str = "/api/articles";
    type CreateParams = CreateArticle;

    fn from_params(params: CreateArticle) -> Self {
        Self {
            id: 0,
            title: params.title,
            url: params.url,
            explanation: params.explanation,
            email: params.email,
            date_added: params.date_added,
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be blank".into()));
        }
        if self.url.trim().is_empty() {
            return Err(AppError::BadRequest("url must not be blank".into()));
        }
        if self.url.chars().count() > MAX_URL_LEN {
            return Err(AppError::BadRequest(format!(
                "url must be at most {MAX_URL_LEN} characters"
            )));
        }
        Ok(())
    }
}
