use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{assigned, datetime};
use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

/// A review attached to a specific dining commons menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemReview {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Entity for MenuItemReview {
    type Key = i64;
    const NAME: &'static str = "MenuItemReview";

    fn key(&self) -> Option<i64> {
        assigned(self.id)
    }

    fn with_key(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl PgEntity for MenuItemReview {
    const TABLE: &'static str = "menuitemreview";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "item_id",
        "reviewer_email",
        "stars",
        "date_reviewed",
        "comments",
    ];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS menuitemreview (
        id BIGSERIAL PRIMARY KEY,
        item_id BIGINT NOT NULL,
        reviewer_email TEXT NOT NULL,
        stars INTEGER NOT NULL,
        date_reviewed TIMESTAMP NOT NULL,
        comments TEXT NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.item_id)
            .bind(&self.reviewer_email)
            .bind(self.stars)
            .bind(self.date_reviewed)
            .bind(&self.comments)
    }
}

impl RestEntity for MenuItemReview {
    const BASE_PATH: &'static str = "/api/menuitemreview";
    type CreateParams = CreateMenuItemReview;

    fn from_params(params: CreateMenuItemReview) -> Self {
        Self {
            id: 0,
            item_id: params.item_id,
            reviewer_email: params.reviewer_email,
            stars: params.stars,
            date_reviewed: params.date_reviewed,
            comments: params.comments,
        }
    }
}
