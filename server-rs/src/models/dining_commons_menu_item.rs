use serde::{Deserialize, Serialize};

use super::assigned;
use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiningCommonsMenuItem {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiningCommonsMenuItem {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Entity for DiningCommonsMenuItem {
    type Key = i64;
    const NAME: &'static str = "UCSBDiningCommonsMenuItem";

    fn key(&self) -> Option<i64> {
        assigned(self.id)
    }

    fn with_key(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl PgEntity for DiningCommonsMenuItem {
    const TABLE: &'static str = "ucsbdiningcommonsmenuitem";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["dining_commons_code", "name", "station"];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS ucsbdiningcommonsmenuitem (
        id BIGSERIAL PRIMARY KEY,
        dining_commons_code TEXT NOT NULL,
        name TEXT NOT NULL,
        station TEXT NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.dining_commons_code)
            .bind(&self.name)
            .bind(&self.station)
    }
}

impl RestEntity for DiningCommonsMenuItem {
    const BASE_PATH: &'static str = "/api/ucsbdiningcommonsmenuitem";
    type CreateParams = CreateDiningCommonsMenuItem;

    fn from_params(params: CreateDiningCommonsMenuItem) -> Self {
        Self {
            id: 0,
            dining_commons_code: params.dining_commons_code,
            name: params.name,
            station: params.station,
        }
    }
}
