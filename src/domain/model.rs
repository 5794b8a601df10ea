use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{validate_positive_finite, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const MIN_COMMON_AREA_PERCENTAGE: f64 = 0.0;
pub const MAX_COMMON_AREA_PERCENTAGE: f64 = 50.0;
pub const MIN_STREET_FACING_SIDES: u8 = 1;
pub const MAX_STREET_FACING_SIDES: u8 = 4;
/// 2^53，超過後 f64 無法精確表示整數平方公尺
pub const MAX_TOTAL_BASE_AREA: f64 = 9_007_199_254_740_992.0;

/// 房型，例如 "2+1" 代表兩房一廳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApartmentType {
    #[serde(rename = "1+1")]
    OnePlusOne,
    #[serde(rename = "2+1")]
    TwoPlusOne,
    #[serde(rename = "3+1")]
    ThreePlusOne,
    #[serde(rename = "4+1")]
    FourPlusOne,
}

impl ApartmentType {
    pub const ALL: [ApartmentType; 4] = [
        ApartmentType::OnePlusOne,
        ApartmentType::TwoPlusOne,
        ApartmentType::ThreePlusOne,
        ApartmentType::FourPlusOne,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApartmentType::OnePlusOne => "1+1",
            ApartmentType::TwoPlusOne => "2+1",
            ApartmentType::ThreePlusOne => "3+1",
            ApartmentType::FourPlusOne => "4+1",
        }
    }
}

impl fmt::Display for ApartmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApartmentType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ApartmentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == trimmed)
            .ok_or_else(|| {
                PlannerError::validation(
                    "apartmentType",
                    s,
                    "Apartment type must be one of 1+1, 2+1, 3+1, 4+1",
                )
            })
    }
}

/// 目錄中的一筆樓層方案（唯讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: String,
    pub apartment_type: ApartmentType,
    pub street_facing_sides: u8,
    pub min_usable_area: f64,
    pub max_usable_area: f64,
    pub average_apartment_area: f64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_apartments: Option<u32>,
}

impl PlanRecord {
    pub fn area_range_contains(&self, area: f64) -> bool {
        area >= self.min_usable_area && area <= self.max_usable_area
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAverage {
    pub average_area: f64,
}

/// 目錄檔案的原始結構
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub floor_plans: Vec<PlanRecord>,
    #[serde(default)]
    pub apartment_type_averages: BTreeMap<ApartmentType, TypeAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub total_base_area: f64,
    pub common_area_percentage: f64,
    pub street_facing_sides: u8,
    pub apartment_type: ApartmentType,
}

impl CalculationRequest {
    pub fn new(
        total_base_area: f64,
        common_area_percentage: f64,
        street_facing_sides: u8,
        apartment_type: ApartmentType,
    ) -> Self {
        Self {
            total_base_area,
            common_area_percentage,
            street_facing_sides,
            apartment_type,
        }
    }

    /// 從 JSON 物件解析請求，逐欄回報缺漏或型別錯誤
    pub fn from_json(payload: &serde_json::Value) -> Result<Self> {
        let object = payload.as_object().ok_or_else(|| {
            PlannerError::validation("body", payload, "Request body must be a JSON object")
        })?;

        let total_base_area = number_field(object, "totalBaseArea")?;
        let common_area_percentage = number_field(object, "commonAreaPercentage")?;

        let sides = number_field(object, "streetFacingSides")?;
        if sides.fract() != 0.0 {
            return Err(PlannerError::validation(
                "streetFacingSides",
                sides,
                "Value must be an integer",
            ));
        }
        validate_range(
            "streetFacingSides",
            sides,
            f64::from(MIN_STREET_FACING_SIDES),
            f64::from(MAX_STREET_FACING_SIDES),
        )?;

        let apartment_type = match object.get("apartmentType") {
            None | Some(serde_json::Value::Null) => {
                return Err(PlannerError::MissingFieldError {
                    field: "apartmentType".to_string(),
                })
            }
            Some(serde_json::Value::String(s)) => s.parse::<ApartmentType>()?,
            Some(other) => {
                return Err(PlannerError::validation(
                    "apartmentType",
                    other,
                    "Value must be a string",
                ))
            }
        };

        let request = Self::new(
            total_base_area,
            common_area_percentage,
            sides as u8,
            apartment_type,
        );
        request.validate()?;
        Ok(request)
    }
}

fn number_field(object: &serde_json::Map<String, serde_json::Value>, field: &str) -> Result<f64> {
    match object.get(field) {
        None | Some(serde_json::Value::Null) => Err(PlannerError::MissingFieldError {
            field: field.to_string(),
        }),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| PlannerError::validation(field, value, "Value must be numeric")),
    }
}

impl Validate for CalculationRequest {
    fn validate(&self) -> Result<()> {
        validate_positive_finite("totalBaseArea", self.total_base_area)?;
        if self.total_base_area > MAX_TOTAL_BASE_AREA {
            return Err(PlannerError::validation(
                "totalBaseArea",
                self.total_base_area,
                format!("Value must not exceed {}", MAX_TOTAL_BASE_AREA),
            ));
        }
        if !self.common_area_percentage.is_finite() {
            return Err(PlannerError::validation(
                "commonAreaPercentage",
                self.common_area_percentage,
                "Value must be a finite number",
            ));
        }
        validate_range(
            "commonAreaPercentage",
            self.common_area_percentage,
            MIN_COMMON_AREA_PERCENTAGE,
            MAX_COMMON_AREA_PERCENTAGE,
        )?;
        validate_range(
            "streetFacingSides",
            self.street_facing_sides,
            MIN_STREET_FACING_SIDES,
            MAX_STREET_FACING_SIDES,
        )?;
        Ok(())
    }
}

/// 被選中的方案與其評分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlan {
    #[serde(flatten)]
    pub plan: PlanRecord,
    pub score: f64,
    pub estimated_total_area: f64,
    /// 估計總面積為 0 時無法計算
    pub area_efficiency: Option<f64>,
    pub within_area_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub common_area: f64,
    pub average_area_per_apartment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_base_area: f64,
    pub common_area_percentage: f64,
    pub net_usable_area: u64,
    pub street_facing_sides: u8,
    pub apartment_type: ApartmentType,
    pub estimated_apartments: u64,
    pub candidate_count: usize,
    pub best_plan: Option<ScoredPlan>,
    pub calculation_details: CalculationDetails,
}

impl CalculationResult {
    pub fn has_match(&self) -> bool {
        self.best_plan.is_some()
    }
}
