use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::{Employee, EmployeePatch};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/employees", tag = "employees",
    responses(
        (status = 200, description = "All employees in stored order", body = [crate::openapi::EmployeeDoc]),
        (status = 500, description = "Storage Error", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, JsonApiError> {
    let list = state.employees.list_all().await?;
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/employees", tag = "employees",
    request_body = crate::openapi::EmployeeDoc,
    responses(
        (status = 201, description = "Created; `Location` points at the new record", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error or Duplicate Key", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = payload?;
    let created = state.employees.create(input).await?;
    info!(id = created.employee.id, location = %created.location, "employee created");
    Ok((StatusCode::CREATED, [(header::LOCATION, created.location)], Json(created.employee)))
}

#[utoipa::path(
    put, path = "/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = crate::openapi::EmployeePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid Body", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Json<Employee>, JsonApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.employees.update(id, &patch).await?))
}

#[utoipa::path(
    delete, path = "/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted; plain-text confirmation", body = String),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<String, JsonApiError> {
    state.employees.delete(id).await?;
    Ok(format!("Employee {id} deleted."))
}
