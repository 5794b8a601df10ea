use crate::domain::model::{ApartmentType, CatalogDocument, PlanRecord, TypeAverage};
use crate::domain::model::{MAX_STREET_FACING_SIDES, MIN_STREET_FACING_SIDES};
use crate::utils::error::{PlannerError, Result};
use std::collections::{BTreeMap, HashSet};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// 驗證過的不可變方案目錄，程序生命週期內只載入一次
#[derive(Debug, Clone)]
pub struct Catalog {
    plans: Vec<PlanRecord>,
    averages: BTreeMap<ApartmentType, TypeAverage>,
}

impl Catalog {
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        validate_document(&document)?;

        tracing::debug!(
            "Catalog validated: {} plans, {} type averages",
            document.floor_plans.len(),
            document.apartment_type_averages.len()
        );

        Ok(Self {
            plans: document.floor_plans,
            averages: document.apartment_type_averages,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Self::from_document(document)
    }

    /// 內建目錄
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn embedded_document() -> Result<CatalogDocument> {
        Ok(serde_json::from_str(EMBEDDED_CATALOG)?)
    }

    pub fn plans(&self) -> &[PlanRecord] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn plan_by_id(&self, id: &str) -> Option<&PlanRecord> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn plans_by_type(&self, apartment_type: ApartmentType) -> Vec<&PlanRecord> {
        self.plans
            .iter()
            .filter(|p| p.apartment_type == apartment_type)
            .collect()
    }

    pub fn average_area(&self, apartment_type: ApartmentType) -> Option<f64> {
        self.averages
            .get(&apartment_type)
            .map(|a| a.average_area)
            .filter(|area| *area > 0.0)
    }

    pub fn averages(&self) -> &BTreeMap<ApartmentType, TypeAverage> {
        &self.averages
    }
}

fn validate_document(document: &CatalogDocument) -> Result<()> {
    for (apartment_type, average) in &document.apartment_type_averages {
        if !average.average_area.is_finite() || average.average_area <= 0.0 {
            return Err(PlannerError::catalog(format!(
                "average area for {} must be a positive number, got {}",
                apartment_type, average.average_area
            )));
        }
    }

    let mut seen_ids = HashSet::new();
    for plan in &document.floor_plans {
        if plan.id.trim().is_empty() {
            return Err(PlannerError::catalog("plan id cannot be empty"));
        }
        if !seen_ids.insert(plan.id.as_str()) {
            return Err(PlannerError::catalog(format!("duplicate plan id '{}'", plan.id)));
        }
        if !(MIN_STREET_FACING_SIDES..=MAX_STREET_FACING_SIDES).contains(&plan.street_facing_sides) {
            return Err(PlannerError::catalog(format!(
                "plan '{}' has streetFacingSides {} outside {}-{}",
                plan.id, plan.street_facing_sides, MIN_STREET_FACING_SIDES, MAX_STREET_FACING_SIDES
            )));
        }
        if plan.min_usable_area > plan.max_usable_area {
            return Err(PlannerError::catalog(format!(
                "plan '{}' has minUsableArea {} greater than maxUsableArea {}",
                plan.id, plan.min_usable_area, plan.max_usable_area
            )));
        }
        if !plan.average_apartment_area.is_finite() || plan.average_apartment_area <= 0.0 {
            return Err(PlannerError::catalog(format!(
                "plan '{}' must have a positive averageApartmentArea",
                plan.id
            )));
        }
        // 有方案使用的房型必須設定平均面積，否則戶數估計會默默變成 0
        if !document
            .apartment_type_averages
            .contains_key(&plan.apartment_type)
        {
            return Err(PlannerError::catalog(format!(
                "plan '{}' uses apartment type {} which has no configured average area",
                plan.id, plan.apartment_type
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(plans: serde_json::Value) -> CatalogDocument {
        serde_json::from_value(json!({
            "apartmentTypeAverages": { "2+1": { "averageArea": 85 } },
            "floorPlans": plans
        }))
        .unwrap()
    }

    fn plan(id: &str, min: f64, max: f64) -> serde_json::Value {
        json!({
            "id": id,
            "apartmentType": "2+1",
            "streetFacingSides": 2,
            "minUsableArea": min,
            "maxUsableArea": max,
            "averageApartmentArea": 85,
            "name": id,
            "description": ""
        })
    }

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for t in ApartmentType::ALL {
            assert!(catalog.average_area(t).is_some(), "missing average for {t}");
        }
        assert_eq!(catalog.average_area(ApartmentType::TwoPlusOne), Some(85.0));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let doc = document(json!([plan("a", 100.0, 200.0), plan("a", 100.0, 200.0)]));
        let err = Catalog::from_document(doc).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_inverted_area_range() {
        let doc = document(json!([plan("a", 300.0, 200.0)]));
        assert!(Catalog::from_document(doc).is_err());
    }

    #[test]
    fn test_rejects_plan_type_without_average() {
        let doc: CatalogDocument = serde_json::from_value(json!({
            "apartmentTypeAverages": {},
            "floorPlans": [plan("a", 100.0, 200.0)]
        }))
        .unwrap();
        assert!(Catalog::from_document(doc).is_err());
    }

    #[test]
    fn test_unknown_apartment_type_fails_to_parse() {
        let result = Catalog::from_json_str(
            r#"{"apartmentTypeAverages": {}, "floorPlans": [{
                "id": "x", "apartmentType": "5+2", "streetFacingSides": 1,
                "minUsableArea": 1, "maxUsableArea": 2, "averageApartmentArea": 1,
                "name": "x", "description": ""
            }]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_by_id_and_type() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.plan_by_id("plan_4").unwrap().street_facing_sides, 2);
        assert!(catalog.plan_by_id("missing").is_none());
        assert!(catalog
            .plans_by_type(ApartmentType::ThreePlusOne)
            .iter()
            .all(|p| p.apartment_type == ApartmentType::ThreePlusOne));
    }
}
