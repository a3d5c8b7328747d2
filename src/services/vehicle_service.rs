use crate::api::error::AppError;
use crate::entities::{prelude::*, *};
use crate::models::{NewVehicle, VehiclePatchRequest, VehicleResponse};
use crate::services::storage::{MediaOwner, MediaStore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::SimpleExpr,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

pub struct VehicleService {
    db: DatabaseConnection,
    media: Arc<dyn MediaStore>,
}

impl VehicleService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    async fn find_with_category(
        &self,
        filter: Option<SimpleExpr>,
    ) -> Result<Vec<VehicleResponse>, sea_orm::DbErr> {
        let mut query = Vehicles::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }

        let rows = query
            .order_by_asc(vehicles::Column::Id)
            .find_also_related(Categories)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(vehicle, category)| VehicleResponse::new(vehicle, category))
            .collect())
    }

    pub async fn list_all(&self) -> Result<Vec<VehicleResponse>, AppError> {
        info!("Fetching all vehicles");
        self.find_with_category(None)
            .await
            .inspect_err(|e| error!("Error fetching vehicles: {}", e))
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<VehicleResponse>, AppError> {
        let row = Vehicles::find_by_id(id)
            .find_also_related(Categories)
            .one(&self.db)
            .await
            .inspect_err(|e| error!("Error fetching vehicle {}: {}", id, e))?;

        Ok(row.map(|(vehicle, category)| VehicleResponse::new(vehicle, category)))
    }

    pub async fn list_offers(&self) -> Result<Vec<VehicleResponse>, AppError> {
        self.find_with_category(Some(vehicles::Column::IsOffer.eq(true)))
            .await
            .inspect_err(|e| error!("Error fetching offers: {}", e))
            .map_err(AppError::from)
    }

    pub async fn list_top_selling(&self) -> Result<Vec<VehicleResponse>, AppError> {
        self.find_with_category(Some(vehicles::Column::IsTopSelling.eq(true)))
            .await
            .inspect_err(|e| error!("Error fetching top selling vehicles: {}", e))
            .map_err(AppError::from)
    }

    /// Store up to three images, then insert the vehicle row.
    ///
    /// Files already written stay on disk if a later step fails; the error
    /// still reaches the caller.
    pub async fn create(&self, input: NewVehicle) -> Result<VehicleResponse, AppError> {
        input.validate()?;
        info!("Creating vehicle {}", input.name);

        let name = input.name.clone();
        self.insert_vehicle(input)
            .await
            .inspect_err(|e| error!("Error creating vehicle {}: {}", name, e))
    }

    async fn insert_vehicle(&self, input: NewVehicle) -> Result<VehicleResponse, AppError> {
        let owner = MediaOwner::Vehicle(input.name.clone());
        let mut image_paths = Vec::new();
        for image in input.images.iter().flatten() {
            if image.is_empty() {
                continue;
            }
            let path = self
                .media
                .save(&owner, &image.data, &image.file_name)
                .await?;
            image_paths.push(path);
        }

        let image_paths =
            serde_json::to_string(&image_paths).map_err(|e| AppError::Internal(e.to_string()))?;

        let vehicle = vehicles::ActiveModel {
            name: Set(input.name),
            vehicle_type: Set(input.vehicle_type),
            category_id: Set(input.category_id),
            price_per_day: Set(input.price_per_day),
            is_offer: Set(input.is_offer),
            offer_percentage: Set(input.offer_percentage),
            speed: Set(input.speed),
            description: Set(input.description),
            is_top_selling: Set(input.is_top_selling),
            available_for_rent: Set(input.available_for_rent),
            image_paths: Set(image_paths),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        let category = vehicle.find_related(Categories).one(&self.db).await?;

        info!("Vehicle created successfully with ID {}", vehicle.id);
        Ok(VehicleResponse::new(vehicle, category))
    }

    /// Apply only the fields present in `patch`
    pub async fn update(
        &self,
        id: i32,
        patch: VehiclePatchRequest,
    ) -> Result<Option<VehicleResponse>, AppError> {
        patch.validate()?;

        let updated = self
            .apply_patch(id, patch)
            .await
            .inspect_err(|e| error!("Error updating vehicle {}: {}", id, e))?;

        let Some(vehicle) = updated else {
            return Ok(None);
        };

        let category = vehicle
            .find_related(Categories)
            .one(&self.db)
            .await
            .inspect_err(|e| error!("Error updating vehicle {}: {}", id, e))?;

        info!("Vehicle {} updated", id);
        Ok(Some(VehicleResponse::new(vehicle, category)))
    }

    async fn apply_patch(
        &self,
        id: i32,
        patch: VehiclePatchRequest,
    ) -> Result<Option<vehicles::Model>, sea_orm::DbErr> {
        let txn = self.db.begin().await?;

        let Some(vehicle) = Vehicles::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: vehicles::ActiveModel = vehicle.clone().into();
        if let Some(price) = patch.price_per_day {
            active.price_per_day = Set(price);
        }
        if let Some(is_offer) = patch.is_offer {
            active.is_offer = Set(is_offer);
        }
        if let Some(pct) = patch.offer_percentage {
            active.offer_percentage = Set(pct);
        }
        if let Some(top) = patch.is_top_selling {
            active.is_top_selling = Set(top);
        }
        if let Some(available) = patch.available_for_rent {
            active.available_for_rent = Set(available);
        }

        let vehicle = if active.is_changed() {
            active.update(&txn).await?
        } else {
            vehicle
        };

        txn.commit().await?;
        Ok(Some(vehicle))
    }

    /// Remove the vehicle's media directory, then its row
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let Some(vehicle) = Vehicles::find_by_id(id)
            .one(&self.db)
            .await
            .inspect_err(|e| error!("Error deleting vehicle {}: {}", id, e))?
        else {
            return Ok(false);
        };

        self.media
            .delete_all(&MediaOwner::Vehicle(vehicle.name.clone()))
            .await
            .inspect_err(|e| error!("Error deleting media of vehicle {}: {}", id, e))?;

        vehicle
            .delete(&self.db)
            .await
            .inspect_err(|e| error!("Error deleting vehicle {}: {}", id, e))?;

        info!("Vehicle {} deleted", id);
        Ok(true)
    }
}
