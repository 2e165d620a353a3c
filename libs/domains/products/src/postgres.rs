use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::{ProductCriterion, ProductQuery, ProductRepository},
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the products table if it is missing
    pub async fn ensure_schema(&self) -> Result<(), database::DatabaseError> {
        database::postgres::ensure_table(&self.db, entity::Entity).await
    }
}

/// `%needle%` for a case-insensitive LIKE, with LIKE metacharacters escaped
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn lower_contains(column: entity::Column, needle: &str) -> Condition {
    use sea_orm::sea_query::ExprTrait;

    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(like_pattern(needle)).escape('\\')),
    )
}

fn condition(query: &ProductQuery) -> Condition {
    query
        .criteria
        .iter()
        .fold(Condition::all(), |condition, criterion| match criterion {
            ProductCriterion::ById(id) => condition.add(entity::Column::ProductId.eq(*id)),
            ProductCriterion::NameContains(text) => {
                condition.add(lower_contains(entity::Column::ProductName, text))
            }
            ProductCriterion::CategoryContains(text) => {
                condition.add(lower_contains(entity::Column::Category, text))
            }
        })
}

fn into_products(models: Vec<entity::Model>) -> ProductResult<Vec<Product>> {
    models.into_iter().map(Product::try_from).collect()
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Database(e.to_string()))?;

        into_products(models)
    }

    async fn find_one(&self, query: ProductQuery) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(condition(&query))
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Database(e.to_string()))?;

        model.map(Product::try_from).transpose()
    }

    async fn find_many(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(condition(&query))
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Database(e.to_string()))?;

        into_products(models)
    }

    async fn insert(&self, mut product: Product) -> ProductResult<Option<Product>> {
        if product.product_id.is_nil() {
            product.product_id = Uuid::now_v7();
        }
        let active_model: entity::ActiveModel = product.into();

        match active_model.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = %model.product_id, "Created product");
                Product::try_from(model).map(Some)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::warn!(error = %e, "Product id already exists");
                Ok(None)
            }
            Err(e) => Err(ProductError::Database(e.to_string())),
        }
    }

    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        let active_model: entity::ActiveModel = product.into();

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = %model.product_id, "Updated product");
                Product::try_from(model).map(Some)
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ProductError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ProductError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait};

    fn model(name: &str) -> entity::Model {
        entity::Model {
            product_id: Uuid::now_v7(),
            product_name: Some(name.to_string()),
            category: "Hardware".to_string(),
            unit_price: Decimal::new(1299, 2),
            quantity_in_stock: 7,
        }
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("Bolt"), "%bolt%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn test_contains_query_is_case_insensitive_like() {
        let sql = entity::Entity::find()
            .filter(condition(&ProductQuery::name_contains("Bolt")))
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("LIKE '%bolt%'"), "{sql}");
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let rows = vec![model("Hammer"), model("Saw")];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows.clone()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, rows[0].product_id);
        assert_eq!(products[1].category, ProductCategory::Hardware);
    }

    #[tokio::test]
    async fn test_find_one_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let found = repo.find_one(ProductQuery::by_id(Uuid::now_v7())).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let row = model("Hammer");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = Product::try_from(row.clone()).unwrap();
        let stored = repo.insert(product).await.unwrap().unwrap();
        assert_eq!(stored.product_id, row.product_id);
    }

    #[tokio::test]
    async fn test_update_returns_row() {
        let row = model("Claw Hammer");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let updated = repo
            .update(Product::try_from(row.clone()).unwrap())
            .await
            .unwrap();
        assert_eq!(updated.and_then(|p| p.product_name), row.product_name);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);
        let id = Uuid::now_v7();

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_existing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_maps_to_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(matches!(repo.list().await, Err(ProductError::Database(_))));
    }
}
