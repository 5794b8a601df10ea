use crate::core::matcher::PlanMatcher;
use crate::domain::model::{ApartmentType, CalculationRequest};
use crate::domain::ports::{PlanRenderer, RenderContext};
use crate::utils::error::PlannerError;
use serde::Serialize;
use serde_json::{json, Value};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// 與框架無關的回應：狀態碼加 JSON body，由外層伺服器自行轉成 HTTP
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: STATUS_OK,
            body,
        }
    }

    fn not_found(body: Value) -> Self {
        Self {
            status: STATUS_NOT_FOUND,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<PlannerError> for ApiResponse {
    fn from(error: PlannerError) -> Self {
        match &error {
            PlannerError::ValidationError { field, reason, .. } => Self {
                status: STATUS_BAD_REQUEST,
                body: json!({ "error": "validation_error", "field": field, "reason": reason }),
            },
            PlannerError::MissingFieldError { field } => Self {
                status: STATUS_BAD_REQUEST,
                body: json!({ "error": "validation_error", "field": field, "reason": "Field is required" }),
            },
            PlannerError::PlanNotFound { id } => Self::not_found(json!({
                "error": "plan_not_found",
                "id": id,
            })),
            other => {
                tracing::error!("❌ Request failed: {}", other);
                Self {
                    status: STATUS_INTERNAL_ERROR,
                    body: json!({ "error": "internal_error" }),
                }
            }
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, PlannerError> {
    Ok(serde_json::to_value(value)?)
}

/// `POST /api/calculate`
///
/// 輸入合法但沒有符合的方案時回 404，body 仍帶完整計算結果，`bestPlan` 為 null
pub fn handle_calculate(matcher: &PlanMatcher, payload: &Value) -> ApiResponse {
    let result = CalculationRequest::from_json(payload)
        .and_then(|request| matcher.calculate_floor_plan(&request))
        .and_then(|result| Ok((result.has_match(), to_body(&result)?)));

    match result {
        Ok((true, body)) => ApiResponse::ok(body),
        Ok((false, body)) => {
            tracing::info!("No matching plan for request: {}", payload);
            ApiResponse::not_found(body)
        }
        Err(e) => {
            tracing::warn!("Rejected calculation request: {}", e);
            e.into()
        }
    }
}

/// `GET /api/plans`
pub fn handle_plans(matcher: &PlanMatcher) -> ApiResponse {
    let catalog = matcher.catalog();
    match (to_body(&catalog.plans()), to_body(catalog.averages())) {
        (Ok(plans), Ok(averages)) => ApiResponse::ok(json!({
            "floorPlans": plans,
            "apartmentTypeAverages": averages,
        })),
        (Err(e), _) | (_, Err(e)) => e.into(),
    }
}

/// `GET /api/plan/:type`
pub fn handle_plans_by_type(matcher: &PlanMatcher, apartment_type: &str) -> ApiResponse {
    let apartment_type = match apartment_type.parse::<ApartmentType>() {
        Ok(t) => t,
        Err(e) => return e.into(),
    };

    let plans = matcher.catalog().plans_by_type(apartment_type);
    if plans.is_empty() {
        return ApiResponse::not_found(json!({
            "error": "no_plans_for_type",
            "apartmentType": apartment_type,
        }));
    }

    match to_body(&plans) {
        Ok(plans) => ApiResponse::ok(json!({
            "apartmentType": apartment_type,
            "plans": plans,
        })),
        Err(e) => e.into(),
    }
}

/// `GET /api/plans/:id/svg`
pub fn handle_plan_svg<R: PlanRenderer>(matcher: &PlanMatcher, renderer: &R, id: &str) -> ApiResponse {
    match matcher.catalog().plan_by_id(id) {
        Some(plan) => ApiResponse::ok(json!({
            "id": plan.id,
            "svg": renderer.render(plan, &RenderContext::default()),
        })),
        None => PlannerError::PlanNotFound { id: id.to_string() }.into(),
    }
}
