//! Employee API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{
    CreateEmployeeRequest, EmployeeResponse, PatchEmployeeRequest, UpdateEmployeeRequest,
};
use crate::application::EmployeeService;
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiResult;

/// `GET /api/v1/employees`: every employee, unpaged
pub async fn list_employees(
    State(service): State<EmployeeService>,
) -> ApiResult<Json<ApiResponse<Vec<EmployeeResponse>>>> {
    let items = service.list_all().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(EmployeeResponse::from).collect(),
    )))
}

/// `GET /api/v2/employees?page=&page_size=`
pub async fn list_employees_paged(
    State(service): State<EmployeeService>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<EmployeeResponse>>>> {
    let page = service.list(params.normalize()).await?;
    Ok(Json(ApiResponse::success(page.into())))
}

pub async fn get_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<EmployeeResponse>>> {
    let employee = service.get(id).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}

pub async fn create_employee(
    State(service): State<EmployeeService>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EmployeeResponse>>)> {
    let employee = service.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Employee created", employee.into())),
    ))
}

pub async fn update_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> ApiResult<Json<ApiResponse<EmployeeResponse>>> {
    let employee = service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::with_message("Employee updated", employee.into())))
}

pub async fn patch_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<PatchEmployeeRequest>,
) -> ApiResult<Json<ApiResponse<EmployeeResponse>>> {
    let employee = service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::with_message("Employee updated", employee.into())))
}

pub async fn delete_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
