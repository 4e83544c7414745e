use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::QueryAs;
use sqlx::{Encode, FromRow, Postgres, Type};

use super::{missing_key, Entity, EntityKey, Repository};
use crate::error::AppResult;

pub type PgQueryAs<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// Table metadata for an entity stored in PostgreSQL.
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    /// Value columns, in the order `bind_columns` binds them.
    const COLUMNS: &'static [&'static str];
    const DDL: &'static str;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;
}

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub async fn ensure_table(&self) -> AppResult<()> {
        sqlx::query(E::DDL).execute(&self.pool).await?;
        tracing::debug!(table = E::TABLE, "table ready");
        Ok(())
    }

    fn returning() -> String {
        format!("{}, {}", E::KEY_COLUMN, E::COLUMNS.join(", "))
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", Self::returning(), E::TABLE)
    }

    fn insert_sql() -> String {
        let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|i| format!("${i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders.join(", "),
            Self::returning()
        )
    }

    fn upsert_sql() -> String {
        let placeholders: Vec<String> =
            (1..=E::COLUMNS.len() + 1).map(|i| format!("${i}")).collect();
        let assignments: Vec<String> = E::COLUMNS
            .iter()
            .map(|c| format!("{c} = EXCLUDED.{c}"))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {} RETURNING {}",
            E::TABLE,
            Self::returning(),
            placeholders.join(", "),
            E::KEY_COLUMN,
            assignments.join(", "),
            Self::returning()
        )
    }
}

#[async_trait]
impl<E> Repository<E> for PgRepository<E>
where
    E: PgEntity,
    E::Key: for<'q> Encode<'q, Postgres> + Type<Postgres>,
{
    async fn find_all(&self) -> AppResult<Vec<E>> {
        let sql = format!("{} ORDER BY {}", Self::select_sql(), E::KEY_COLUMN);
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, key: &E::Key) -> AppResult<Option<E>> {
        let sql = format!("{} WHERE {} = $1", Self::select_sql(), E::KEY_COLUMN);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(key.clone())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, entity: E) -> AppResult<E> {
        let saved = match entity.key() {
            Some(key) => {
                let sql = Self::upsert_sql();
                let query = sqlx::query_as::<_, E>(&sql).bind(key);
                entity.bind_columns(query).fetch_one(&self.pool).await?
            }
            None if E::Key::SURROGATE => {
                let sql = Self::insert_sql();
                let query = sqlx::query_as::<_, E>(&sql);
                entity.bind_columns(query).fetch_one(&self.pool).await?
            }
            None => return Err(missing_key::<E>()),
        };
        Ok(saved)
    }

    async fn delete(&self, key: &E::Key) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN);
        let result = sqlx::query(&sql)
            .bind(key.clone())
            .execute(&self.pool)
            .await?;
        tracing::debug!(table = E::TABLE, rows = result.rows_affected(), "delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Article, DiningCommonsMenuItem, HelpRequest, MenuItemReview, Organization,
        RecommendationRequest,
    };
    use chrono::NaiveDate;
    use rstest::rstest;

    /// Column names declared by a `CREATE TABLE` statement, in order.
    fn ddl_columns(ddl: &str) -> Vec<&str> {
        ddl.lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .filter(|word| *word != ")")
            .collect()
    }

    fn declared<E: PgEntity>() -> Vec<&'static str> {
        let mut columns = vec![E::KEY_COLUMN];
        columns.extend_from_slice(E::COLUMNS);
        columns
    }

    #[rstest]
    #[case::help_requests(ddl_columns(HelpRequest::DDL), declared::<HelpRequest>())]
    #[case::recommendations(
        ddl_columns(RecommendationRequest::DDL),
        declared::<RecommendationRequest>()
    )]
    #[case::reviews(ddl_columns(MenuItemReview::DDL), declared::<MenuItemReview>())]
    #[case::articles(ddl_columns(Article::DDL), declared::<Article>())]
    #[case::menu_items(
        ddl_columns(DiningCommonsMenuItem::DDL),
        declared::<DiningCommonsMenuItem>()
    )]
    #[case::organizations(ddl_columns(Organization::DDL), declared::<Organization>())]
    fn table_definition_matches_column_list(
        #[case] in_ddl: Vec<&'static str>,
        #[case] declared: Vec<&'static str>,
    ) {
        assert_eq!(in_ddl, declared);
    }

    #[test]
    fn select_lists_key_first() {
        assert_eq!(
            PgRepository::<DiningCommonsMenuItem>::select_sql(),
            "SELECT id, dining_commons_code, name, station FROM ucsbdiningcommonsmenuitem"
        );
    }

    #[test]
    fn insert_leaves_surrogate_key_to_the_database() {
        assert_eq!(
            PgRepository::<DiningCommonsMenuItem>::insert_sql(),
            "INSERT INTO ucsbdiningcommonsmenuitem (dining_commons_code, name, station) \
             VALUES ($1, $2, $3) RETURNING id, dining_commons_code, name, station"
        );
    }

    #[test]
    fn upsert_binds_key_first_and_never_updates_it() {
        let sql = PgRepository::<Organization>::upsert_sql();
        assert_eq!(
            sql,
            "INSERT INTO ucsborganization \
             (org_code, org_translation_short, org_translation, inactive) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (org_code) DO UPDATE SET \
             org_translation_short = EXCLUDED.org_translation_short, \
             org_translation = EXCLUDED.org_translation, \
             inactive = EXCLUDED.inactive \
             RETURNING org_code, org_translation_short, org_translation, inactive"
        );

        let set_clause = sql
            .split(" SET ")
            .nth(1)
            .and_then(|rest| rest.split(" RETURNING ").next())
            .unwrap();
        assert!(!set_clause.contains("org_code"));
    }

    #[test]
    fn upsert_covers_every_column_of_a_surrogate_entity() {
        let sql = PgRepository::<HelpRequest>::upsert_sql();
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7)"));
        assert!(sql.contains("ON CONFLICT (id) DO UPDATE SET requester_email"));
        assert!(!sql.contains("id = EXCLUDED.id"));
    }

    /// Round trip against a real database when `TEST_DATABASE_URL` is set.
    #[tokio::test]
    async fn round_trip_against_postgres() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let pool = PgPool::connect(&url).await.unwrap();

        let requests = PgRepository::<HelpRequest>::new(pool.clone());
        requests.ensure_table().await.unwrap();
        let request_time = NaiveDate::from_ymd_opt(2022, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let saved = requests
            .save(HelpRequest {
                id: 0,
                requester_email: "admin@ucsb.edu".into(),
                team_id: "f25-14".into(),
                table_or_breakout_room: "table 3".into(),
                request_time,
                explanation: "stuck on lab".into(),
                solved: true,
            })
            .await
            .unwrap();
        assert!(saved.id > 0);
        assert_eq!(requests.find_by_id(&saved.id).await.unwrap(), Some(saved.clone()));

        let replaced = requests
            .save(HelpRequest {
                team_id: "f25-15".into(),
                solved: false,
                ..saved.clone()
            })
            .await
            .unwrap();
        assert_eq!(replaced.id, saved.id);
        assert_eq!(replaced.team_id, "f25-15");
        requests.delete(&saved.id).await.unwrap();
        assert_eq!(requests.find_by_id(&saved.id).await.unwrap(), None);

        let organizations = PgRepository::<Organization>::new(pool);
        organizations.ensure_table().await.unwrap();
        let org = Organization {
            org_code: "ZZTEST".into(),
            org_translation_short: "SHORT".into(),
            org_translation: "LONG".into(),
            inactive: false,
        };
        assert_eq!(organizations.save(org.clone()).await.unwrap(), org);
        let updated = organizations
            .save(Organization {
                inactive: true,
                ..org.clone()
            })
            .await
            .unwrap();
        assert!(updated.inactive);
        organizations.delete(&org.org_code).await.unwrap();
        assert_eq!(organizations.find_by_id(&org.org_code).await.unwrap(), None);
    }
}
