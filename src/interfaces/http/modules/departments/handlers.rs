//! Department API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{
    CreateDepartmentRequest, DepartmentResponse, PatchDepartmentRequest, UpdateDepartmentRequest,
};
use crate::application::DepartmentService;
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::modules::employees::EmployeeResponse;

/// `GET /api/v1/departments`: every department, unpaged
pub async fn list_departments(
    State(service): State<DepartmentService>,
) -> ApiResult<Json<ApiResponse<Vec<DepartmentResponse>>>> {
    let items = service.list_all().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(DepartmentResponse::from).collect(),
    )))
}

/// `GET /api/v2/departments?page=&page_size=`
pub async fn list_departments_paged(
    State(service): State<DepartmentService>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<DepartmentResponse>>>> {
    let page = service.list(params.normalize()).await?;
    Ok(Json(ApiResponse::success(page.into())))
}

pub async fn get_department(
    State(service): State<DepartmentService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<DepartmentResponse>>> {
    let department = service.get(id).await?;
    Ok(Json(ApiResponse::success(department.into())))
}

pub async fn create_department(
    State(service): State<DepartmentService>,
    ValidatedJson(request): ValidatedJson<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DepartmentResponse>>)> {
    let department = service.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Department created", department.into())),
    ))
}

pub async fn update_department(
    State(service): State<DepartmentService>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateDepartmentRequest>,
) -> ApiResult<Json<ApiResponse<DepartmentResponse>>> {
    let department = service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::with_message("Department updated", department.into())))
}

pub async fn patch_department(
    State(service): State<DepartmentService>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<PatchDepartmentRequest>,
) -> ApiResult<Json<ApiResponse<DepartmentResponse>>> {
    let department = service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::with_message("Department updated", department.into())))
}

pub async fn delete_department(
    State(service): State<DepartmentService>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v2/departments/{id}/employees`
pub async fn list_department_employees(
    State(service): State<DepartmentService>,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<EmployeeResponse>>>> {
    let page = service.list_employees(id, params.normalize()).await?;
    Ok(Json(ApiResponse::success(page.into())))
}
