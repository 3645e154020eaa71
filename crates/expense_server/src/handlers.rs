//! Route handlers. Each request runs in exactly one unit of work.

use crate::dto::{CreateCategoryRequest, CreateCodeRequest, UpdateCategoryRequest, UpdateCodeRequest};
use crate::error::ApiError;
use crate::extract::{EntityId, ValidatedJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use expense_core::{
    sqlite_category_service, sqlite_code_service, CategoryPatch, CodePatch, ExpenseCategory,
    ExpenseCode, NewCategory, NewCode,
};
use log::info;
use serde_json::{json, Value};

pub async fn route_not_found() -> ApiError {
    ApiError::Http(StatusCode::NOT_FOUND, "Not Found".to_string())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::Http(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpenseCategory>>, ApiError> {
    let categories = state
        .run(|conn| sqlite_category_service(conn).list_categories())
        .await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ExpenseCategory>), ApiError> {
    let input = NewCategory::from(request);
    let category = state
        .run(move |conn| sqlite_category_service(conn).create_category(&input))
        .await?;
    info!(
        "event=category_create module=http status=ok category_id={}",
        category.id
    );
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    EntityId(category_id): EntityId,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> Result<Json<ExpenseCategory>, ApiError> {
    let patch = CategoryPatch::from(request);
    let category = state
        .run(move |conn| sqlite_category_service(conn).update_category(category_id, &patch))
        .await?;
    info!("event=category_update module=http status=ok category_id={category_id}");
    Ok(Json(category))
}

pub async fn list_codes(
    State(state): State<AppState>,
    EntityId(category_id): EntityId,
) -> Result<Json<Vec<ExpenseCode>>, ApiError> {
    let codes = state
        .run(move |conn| sqlite_category_service(conn).list_codes_for_category(category_id))
        .await?;
    Ok(Json(codes))
}

pub async fn create_code(
    State(state): State<AppState>,
    EntityId(category_id): EntityId,
    ValidatedJson(request): ValidatedJson<CreateCodeRequest>,
) -> Result<(StatusCode, Json<ExpenseCode>), ApiError> {
    let input = NewCode::from(request);
    let code = state
        .run(move |conn| sqlite_category_service(conn).create_code_for_category(category_id, &input))
        .await?;
    info!(
        "event=code_create module=http status=ok category_id={category_id} code_id={}",
        code.id
    );
    Ok((StatusCode::CREATED, Json(code)))
}

pub async fn update_code(
    State(state): State<AppState>,
    EntityId(code_id): EntityId,
    ValidatedJson(request): ValidatedJson<UpdateCodeRequest>,
) -> Result<Json<ExpenseCode>, ApiError> {
    let patch = CodePatch::from(request);
    let code = state
        .run(move |conn| sqlite_code_service(conn).update_code(code_id, &patch))
        .await?;
    info!("event=code_update module=http status=ok code_id={code_id}");
    Ok(Json(code))
}
