use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::usecases::u510_upload_staging::StagedUpload;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set};

/// Staged spreadsheet rows, one record per upload key
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "u510_upload_staging")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub format: String,
    pub file_name: Option<String>,
    pub row_count: i64,
    pub rows_json: String,
    pub stored_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StagedUpload {
    fn from(m: Model) -> Self {
        let stored_at = DateTime::parse_from_rfc3339(&m.stored_at)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default();
        Self {
            key: m.key,
            format: m.format,
            file_name: m.file_name,
            row_count: m.row_count,
            stored_at,
        }
    }
}

/// Stores the rows under `key`; an existing entry with the same key is replaced.
pub async fn save(
    db: &DatabaseConnection,
    key: &str,
    format: &str,
    file_name: Option<&str>,
    rows: &[serde_json::Map<String, serde_json::Value>],
    stored_at: DateTime<Utc>,
) -> Result<()> {
    let active = ActiveModel {
        key: Set(key.to_string()),
        format: Set(format.to_string()),
        file_name: Set(file_name.map(str::to_string)),
        row_count: Set(rows.len() as i64),
        rows_json: Set(serde_json::to_string(rows)?),
        stored_at: Set(stored_at.to_rfc3339()),
    };

    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([
                    Column::Format,
                    Column::FileName,
                    Column::RowCount,
                    Column::RowsJson,
                    Column::StoredAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    tracing::debug!("Staged upload {} ({} rows)", key, rows.len());
    Ok(())
}

/// Upload history, newest first
pub async fn list(db: &DatabaseConnection) -> Result<Vec<StagedUpload>> {
    let models = Entity::find()
        .order_by_desc(Column::StoredAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(StagedUpload::from).collect())
}

/// Stored rows of one upload
pub async fn get_rows(
    db: &DatabaseConnection,
    key: &str,
) -> Result<Option<Vec<serde_json::Map<String, serde_json::Value>>>> {
    match Entity::find_by_id(key.to_string()).one(db).await? {
        Some(model) => Ok(Some(serde_json::from_str(&model.rows_json)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::TimeZone;
    use serde_json::{json, Map, Value};

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_same_key_last_write_wins() {
        let db = connect_in_memory().await;
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        save(&db, "data_upload_simples_1", "simples", None, &[row(json!({"DATA": "a"}))], at)
            .await
            .unwrap();
        save(
            &db,
            "data_upload_simples_1",
            "simples",
            Some("marco.csv"),
            &[row(json!({"DATA": "b"})), row(json!({"DATA": "c"}))],
            at,
        )
        .await
        .unwrap();

        let uploads = list(&db).await.unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].row_count, 2);
        assert_eq!(uploads[0].file_name.as_deref(), Some("marco.csv"));

        let rows = get_rows(&db, "data_upload_simples_1").await.unwrap().unwrap();
        assert_eq!(rows[0]["DATA"], "b");
        assert!(get_rows(&db, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = connect_in_memory().await;
        let older = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2026, 2, 5, 8, 0, 0).unwrap();

        save(&db, "k_old", "vendas", None, &[], older).await.unwrap();
        save(&db, "k_new", "produtos", None, &[], newer).await.unwrap();

        let keys: Vec<String> = list(&db).await.unwrap().into_iter().map(|u| u.key).collect();
        assert_eq!(keys, vec!["k_new", "k_old"]);
    }
}
