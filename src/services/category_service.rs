use crate::api::error::AppError;
use crate::entities::{prelude::*, *};
use crate::models::{CategoryResponse, NewCategory, UpdateCategoryRequest};
use crate::services::storage::{MediaOwner, MediaStore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

pub struct CategoryService {
    db: DatabaseConnection,
    media: Arc<dyn MediaStore>,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    /// Every category, loaded together with its vehicles
    pub async fn list_all(&self) -> Result<Vec<CategoryResponse>, AppError> {
        info!("Fetching all categories");

        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .find_with_related(Vehicles)
            .all(&self.db)
            .await
            .inspect_err(|e| error!("Error fetching categories: {}", e))?;

        Ok(rows
            .into_iter()
            .map(|(category, _vehicles)| CategoryResponse::from(category))
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<CategoryResponse>, AppError> {
        info!("Fetching category with ID {}", id);

        let category = Categories::find_by_id(id)
            .one(&self.db)
            .await
            .inspect_err(|e| error!("Error fetching category {}: {}", id, e))?;

        Ok(category.map(CategoryResponse::from))
    }

    /// Insert a category, storing its image first when one was uploaded.
    ///
    /// The file write and the row insert are not atomic: a failed insert
    /// leaves an unreferenced file behind.
    pub async fn create(&self, input: NewCategory) -> Result<CategoryResponse, AppError> {
        input.validate()?;
        info!("Creating new category: {}", input.name);

        let image_path = match &input.image {
            Some(image) if !image.is_empty() => self
                .media
                .save(&MediaOwner::Category, &image.data, &image.file_name)
                .await
                .inspect_err(|e| error!("Error saving image for category {}: {}", input.name, e))?,
            _ => String::new(),
        };

        let category = categories::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description),
            image_path: Set(image_path),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .inspect_err(|e| error!("Error creating category {}: {}", input.name, e))?;

        info!("Category created successfully with ID {}", category.id);
        Ok(category.into())
    }

    /// Replace name and description. The image is left untouched.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateCategoryRequest,
    ) -> Result<Option<CategoryResponse>, AppError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let Some(category) = Categories::find_by_id(id)
            .one(&txn)
            .await
            .inspect_err(|e| error!("Error updating category {}: {}", id, e))?
        else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        let updated = active
            .update(&txn)
            .await
            .inspect_err(|e| error!("Error updating category {}: {}", id, e))?;

        txn.commit().await?;

        info!("Category {} updated", id);
        Ok(Some(updated.into()))
    }

    /// Remove a category and every vehicle that references it.
    ///
    /// The category's own image file stays on disk.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let Some(category) = Categories::find_by_id(id)
            .one(&txn)
            .await
            .inspect_err(|e| error!("Error deleting category {}: {}", id, e))?
        else {
            return Ok(false);
        };

        // Matches the ON DELETE CASCADE on vehicles.category_id, for engines running without FK enforcement
        let dependents = Vehicles::delete_many()
            .filter(vehicles::Column::CategoryId.eq(id))
            .exec(&txn)
            .await
            .inspect_err(|e| error!("Error deleting vehicles of category {}: {}", id, e))?;

        category
            .delete(&txn)
            .await
            .inspect_err(|e| error!("Error deleting category {}: {}", id, e))?;

        txn.commit().await?;

        info!(
            "Category {} deleted along with {} vehicles",
            id, dependents.rows_affected
        );
        Ok(true)
    }
}
