use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::grocery_item::errors::GroceryItemError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_item::service::{
    AddGroceryItemParams, GroceryItemService, UpdateGroceryItemParams,
};
use business::domain::unit_of_work::UnitOfWorkFactory;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::grocery_item::dto::{
    CreateGroceryItemRequest, GroceryItemResponse, UpdateGroceryItemRequest,
};
use crate::api::tags::ApiTags;

const ITEM_NOT_FOUND: &str = "grocery_item.not_found";
const LIST_NOT_FOUND: &str = "grocery_list.not_found";

pub struct GroceryItemApi {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    service: Arc<dyn GroceryItemService>,
}

impl GroceryItemApi {
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        service: Arc<dyn GroceryItemService>,
    ) -> Self {
        Self {
            uow_factory,
            service,
        }
    }
}

impl UpdateGroceryItemResponse {
    fn from_outcome(outcome: Result<Option<GroceryItem>, GroceryItemError>) -> Self {
        match outcome {
            Ok(Some(item)) => Self::Ok(Json(item.into())),
            Ok(None) => Self::NotFound(ErrorResponse::not_found(ITEM_NOT_FOUND)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => Self::BadRequest(json),
                    _ => Self::InternalError(json),
                }
            }
        }
    }
}

/// Grocery item management API
///
/// Items are created inside a list and addressed by their own id afterwards.
#[OpenApi]
impl GroceryItemApi {
    /// List the items of a grocery list
    #[oai(
        path = "/grocery-lists/:list_id/items",
        method = "get",
        tag = "ApiTags::GroceryItems"
    )]
    async fn get_by_list(&self, list_id: Path<i64>) -> GetGroceryItemsResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return GetGroceryItemsResponse::InternalError(err.into_error_response().1),
        };

        match self.service.list_items(uow.as_ref(), list_id.0).await {
            Ok(Some(items)) => GetGroceryItemsResponse::Ok(Json(
                items.into_iter().map(GroceryItemResponse::from).collect(),
            )),
            Ok(None) => GetGroceryItemsResponse::NotFound(ErrorResponse::not_found(LIST_NOT_FOUND)),
            Err(err) => GetGroceryItemsResponse::InternalError(err.into_error_response().1),
        }
    }

    /// Add an item to a grocery list
    ///
    /// New items start as pending.
    #[oai(
        path = "/grocery-lists/:list_id/items",
        method = "post",
        tag = "ApiTags::GroceryItems"
    )]
    async fn create(
        &self,
        list_id: Path<i64>,
        body: Json<CreateGroceryItemRequest>,
    ) -> CreateGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return CreateGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        let params = AddGroceryItemParams {
            list_id: list_id.0,
            name: body.0.name,
            quantity: body.0.quantity,
        };

        match self.service.add_item(uow.as_ref(), params).await {
            Ok(Some(item)) => CreateGroceryItemResponse::Created(Json(item.into())),
            Ok(None) => {
                CreateGroceryItemResponse::NotFound(ErrorResponse::not_found(LIST_NOT_FOUND))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateGroceryItemResponse::BadRequest(json),
                    _ => CreateGroceryItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a grocery item
    #[oai(path = "/grocery-items/:id", method = "get", tag = "ApiTags::GroceryItems")]
    async fn get_by_id(&self, id: Path<i64>) -> GetGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return GetGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        match self.service.get_item(uow.as_ref(), id.0).await {
            Ok(Some(item)) => GetGroceryItemResponse::Ok(Json(item.into())),
            Ok(None) => GetGroceryItemResponse::NotFound(ErrorResponse::not_found(ITEM_NOT_FOUND)),
            Err(err) => GetGroceryItemResponse::InternalError(err.into_error_response().1),
        }
    }

    /// Update a grocery item
    ///
    /// Changes the name and/or quantity. Omitted fields are left untouched.
    #[oai(path = "/grocery-items/:id", method = "put", tag = "ApiTags::GroceryItems")]
    async fn update(
        &self,
        id: Path<i64>,
        body: Json<UpdateGroceryItemRequest>,
    ) -> UpdateGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return UpdateGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        let params = UpdateGroceryItemParams {
            id: id.0,
            name: body.0.name,
            quantity: body.0.quantity,
        };

        UpdateGroceryItemResponse::from_outcome(self.service.update_item(uow.as_ref(), params).await)
    }

    /// Mark a grocery item as purchased
    #[oai(
        path = "/grocery-items/:id/purchase",
        method = "post",
        tag = "ApiTags::GroceryItems"
    )]
    async fn purchase(&self, id: Path<i64>) -> UpdateGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return UpdateGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        UpdateGroceryItemResponse::from_outcome(self.service.mark_purchased(uow.as_ref(), id.0).await)
    }

    /// Mark a grocery item as pending again
    #[oai(
        path = "/grocery-items/:id/pending",
        method = "post",
        tag = "ApiTags::GroceryItems"
    )]
    async fn pending(&self, id: Path<i64>) -> UpdateGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return UpdateGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        UpdateGroceryItemResponse::from_outcome(self.service.mark_pending(uow.as_ref(), id.0).await)
    }

    /// Delete a grocery item
    ///
    /// Also removes the item from its list.
    #[oai(path = "/grocery-items/:id", method = "delete", tag = "ApiTags::GroceryItems")]
    async fn delete(&self, id: Path<i64>) -> DeleteGroceryItemResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return DeleteGroceryItemResponse::InternalError(err.into_error_response().1),
        };

        match self.service.delete_item(uow.as_ref(), id.0).await {
            Ok(true) => DeleteGroceryItemResponse::NoContent,
            Ok(false) => {
                DeleteGroceryItemResponse::NotFound(ErrorResponse::not_found(ITEM_NOT_FOUND))
            }
            Err(err) => DeleteGroceryItemResponse::InternalError(err.into_error_response().1),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetGroceryItemsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<GroceryItemResponse>>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateGroceryItemResponse {
    #[oai(status = 201)]
    Created(Json<GroceryItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetGroceryItemResponse {
    #[oai(status = 200)]
    Ok(Json<GroceryItemResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateGroceryItemResponse {
    #[oai(status = 200)]
    Ok(Json<GroceryItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteGroceryItemResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
