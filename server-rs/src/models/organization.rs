use serde::{Deserialize, Serialize};

use crate::repository::postgres::{PgEntity, PgQueryAs};
use crate::repository::Entity;
use crate::routes::crud::RestEntity;

/// A student organization, keyed by its short code (e.g. `ZPR`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Entity for Organization {
    type Key = String;
    const NAME: &'static str = "UCSBOrganization";

    fn key(&self) -> Option<String> {
        (!self.org_code.is_empty()).then(|| self.org_code.clone())
    }

    fn with_key(self, org_code: String) -> Self {
        Self { org_code, ..self }
    }
}

impl PgEntity for Organization {
    const TABLE: &'static str = "ucsborganization";
    const KEY_COLUMN: &'static str = "org_code";
    const COLUMNS: &'static [&'static str] =
        &["org_translation_short", "org_translation", "inactive"];
    const DDL: &'static str = r#"CREATE TABLE IF NOT EXISTS ucsborganization (
        org_code TEXT PRIMARY KEY,
        org_translation_short TEXT NOT NULL,
        org_translation TEXT NOT NULL,
        inactive BOOLEAN NOT NULL
    )"#;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.org_translation_short)
            .bind(&self.org_translation)
            .bind(self.inactive)
    }
}

impl RestEntity for Organization {
    const BASE_PATH: &'static str = "/api/ucsborganization";
    const KEY_PARAM: &'static str = "orgCode";
    type CreateParams = CreateOrganization;

    fn from_params(params: CreateOrganization) -> Self {
        Self {
            org_code: params.org_code.trim().to_string(),
            org_translation_short: params.org_translation_short,
            org_translation: params.org_translation,
            inactive: params.inactive,
        }
    }
}
