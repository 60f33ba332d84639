use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::grocery_list::service::{GroceryListService, UpdateGroceryListParams};
use business::domain::unit_of_work::UnitOfWorkFactory;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::grocery_list::dto::{GroceryListRequest, GroceryListResponse};
use crate::api::tags::ApiTags;

const NOT_FOUND: &str = "grocery_list.not_found";

pub struct GroceryListApi {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    service: Arc<dyn GroceryListService>,
}

impl GroceryListApi {
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        service: Arc<dyn GroceryListService>,
    ) -> Self {
        Self {
            uow_factory,
            service,
        }
    }
}

/// Grocery list management API
///
/// Every request runs in its own unit of work.
#[OpenApi]
impl GroceryListApi {
    /// List all grocery lists
    ///
    /// Returns every list with its items, in creation order.
    #[oai(path = "/grocery-lists", method = "get", tag = "ApiTags::GroceryLists")]
    async fn get_all(&self) -> GetAllGroceryListsResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return GetAllGroceryListsResponse::InternalError(err.into_error_response().1),
        };

        match self.service.list_all(uow.as_ref()).await {
            Ok(lists) => GetAllGroceryListsResponse::Ok(Json(
                lists.into_iter().map(GroceryListResponse::from).collect(),
            )),
            Err(err) => GetAllGroceryListsResponse::InternalError(err.into_error_response().1),
        }
    }

    /// Create a grocery list
    #[oai(path = "/grocery-lists", method = "post", tag = "ApiTags::GroceryLists")]
    async fn create(&self, body: Json<GroceryListRequest>) -> CreateGroceryListResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return CreateGroceryListResponse::InternalError(err.into_error_response().1),
        };

        match self.service.create_list(uow.as_ref(), body.0.name).await {
            Ok(list) => CreateGroceryListResponse::Created(Json(list.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateGroceryListResponse::BadRequest(json),
                    _ => CreateGroceryListResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a grocery list
    #[oai(path = "/grocery-lists/:id", method = "get", tag = "ApiTags::GroceryLists")]
    async fn get_by_id(&self, id: Path<i64>) -> GetGroceryListResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return GetGroceryListResponse::InternalError(err.into_error_response().1),
        };

        match self.service.get_list(uow.as_ref(), id.0).await {
            Ok(Some(list)) => GetGroceryListResponse::Ok(Json(list.into())),
            Ok(None) => GetGroceryListResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => GetGroceryListResponse::InternalError(err.into_error_response().1),
        }
    }

    /// Rename a grocery list
    #[oai(path = "/grocery-lists/:id", method = "put", tag = "ApiTags::GroceryLists")]
    async fn update(
        &self,
        id: Path<i64>,
        body: Json<GroceryListRequest>,
    ) -> UpdateGroceryListResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return UpdateGroceryListResponse::InternalError(err.into_error_response().1),
        };

        let params = UpdateGroceryListParams {
            id: id.0,
            name: body.0.name,
        };

        match self.service.update_list(uow.as_ref(), params).await {
            Ok(Some(list)) => UpdateGroceryListResponse::Ok(Json(list.into())),
            Ok(None) => UpdateGroceryListResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateGroceryListResponse::BadRequest(json),
                    _ => UpdateGroceryListResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a grocery list
    ///
    /// Removes the list together with all of its items.
    #[oai(path = "/grocery-lists/:id", method = "delete", tag = "ApiTags::GroceryLists")]
    async fn delete(&self, id: Path<i64>) -> DeleteGroceryListResponse {
        let uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => return DeleteGroceryListResponse::InternalError(err.into_error_response().1),
        };

        match self.service.delete_list(uow.as_ref(), id.0).await {
            Ok(true) => DeleteGroceryListResponse::NoContent,
            Ok(false) => DeleteGroceryListResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => DeleteGroceryListResponse::InternalError(err.into_error_response().1),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllGroceryListsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<GroceryListResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateGroceryListResponse {
    #[oai(status = 201)]
    Created(Json<GroceryListResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetGroceryListResponse {
    #[oai(status = 200)]
    Ok(Json<GroceryListResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateGroceryListResponse {
    #[oai(status = 200)]
    Ok(Json<GroceryListResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteGroceryListResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
