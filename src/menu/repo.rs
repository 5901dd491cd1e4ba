use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateMenuItemRequest, UpdateMenuItemRequest};
use super::repo_types::MenuItem;

const MENU_COLUMNS: &str = "id, name, price, category, description, image, is_available, created_at";

impl MenuItem {
    /// Full catalog, grouped the way the POS displays it: category first
    /// (case-insensitive), then name.
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items ORDER BY LOWER(category) ASC, name ASC",
        ))
        .fetch_all(db)
        .await?;
        Ok(items)
    }

    pub async fn create(db: &PgPool, req: &CreateMenuItemRequest) -> anyhow::Result<MenuItem> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            INSERT INTO menu_items (name, price, category, description, image, is_available)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
            RETURNING {MENU_COLUMNS}
            "#,
        ))
        .bind(req.name.trim())
        .bind(req.price)
        .bind(req.category.trim())
        .bind(&req.description)
        .bind(&req.image)
        .bind(req.is_available)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        req: &UpdateMenuItemRequest,
    ) -> anyhow::Result<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            UPDATE menu_items SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                category = COALESCE($4, category),
                description = COALESCE($5, description),
                image = COALESCE($6, image),
                is_available = COALESCE($7, is_available)
            WHERE id = $1
            RETURNING {MENU_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&req.name)
        .bind(req.price)
        .bind(&req.category)
        .bind(&req.description)
        .bind(&req.image)
        .bind(req.is_available)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    /// Hard delete. Historical orders keep their by-value copies.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
