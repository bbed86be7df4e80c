use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, entity::prelude::*,
    sea_query::Expr,
};

use crate::entities::{employee, project, task};
use crate::errors::ApiError;

/// By-id operations shared by every entity with an integer key and a
/// `row_version` concurrency token.
///
/// All methods take any [`ConnectionTrait`] so they run the same on a pooled
/// connection or inside a transaction.
#[async_trait]
pub trait Resource: EntityTrait
where
    <Self::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    const ID_COLUMN: Self::Column;
    const VERSION_COLUMN: Self::Column;
    const RESOURCE_NAME: &'static str;

    /// Fetch one row or fail with `NotFound`.
    async fn get_one<C>(db: &C, id: i32) -> Result<Self::Model, ApiError>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))
    }

    async fn exists<C>(db: &C, id: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(Self::find_by_id(id).one(db).await?.is_some())
    }

    /// Idempotent delete: a missing row is not an error.
    async fn delete_one<C>(db: &C, id: i32) -> Result<(), ApiError>
    where
        C: ConnectionTrait,
    {
        let res = Self::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            tracing::debug!(resource = Self::RESOURCE_NAME, id, "Delete target already absent");
        } else {
            tracing::info!(resource = Self::RESOURCE_NAME, id, "Deleted");
        }
        Ok(())
    }

    /// Persist the `Set` fields of `changes` if the row still carries
    /// `row_version`, bumping the version.
    ///
    /// Zero affected rows means the row changed or vanished since it was
    /// read: a vanished row is `NotFound`, a changed one is `Conflict`.
    async fn update_versioned<C, A>(
        db: &C,
        id: i32,
        row_version: i32,
        changes: A,
    ) -> Result<(), ApiError>
    where
        C: ConnectionTrait,
        A: ActiveModelTrait<Entity = Self> + Send,
    {
        let res = Self::update_many()
            .set(changes)
            .col_expr(Self::VERSION_COLUMN, Expr::value(row_version + 1))
            .filter(Self::ID_COLUMN.eq(id))
            .filter(Self::VERSION_COLUMN.eq(row_version))
            .exec(db)
            .await?;

        if res.rows_affected > 0 {
            return Ok(());
        }

        if Self::exists(db, id).await? {
            Err(ApiError::conflict(format!(
                "{} {id} was modified by another request",
                Self::RESOURCE_NAME
            )))
        } else {
            Err(ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))
        }
    }
}

impl Resource for employee::Entity {
    const ID_COLUMN: Self::Column = employee::Column::Id;
    const VERSION_COLUMN: Self::Column = employee::Column::RowVersion;
    const RESOURCE_NAME: &'static str = "Employee";
}

impl Resource for project::Entity {
    const ID_COLUMN: Self::Column = project::Column::Id;
    const VERSION_COLUMN: Self::Column = project::Column::RowVersion;
    const RESOURCE_NAME: &'static str = "Project";
}

impl Resource for task::Entity {
    const ID_COLUMN: Self::Column = task::Column::Id;
    const VERSION_COLUMN: Self::Column = task::Column::RowVersion;
    const RESOURCE_NAME: &'static str = "Task";
}
