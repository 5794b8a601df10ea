use crate::core::catalog::Catalog;
use crate::domain::model::{
    ApartmentType, CalculationDetails, CalculationRequest, CalculationResult, PlanRecord,
    ScoredPlan,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// 面積完全吻合時的分數上限
pub const BASE_SCORE: f64 = 1000.0;

/// 淨使用面積 = 總面積扣除公共區域，四捨五入到整數平方公尺
pub fn compute_net_usable_area(total_base_area: f64, common_area_percentage: f64) -> u64 {
    let net = total_base_area * (1.0 - common_area_percentage / 100.0);
    net.round().max(0.0) as u64
}

/// 篩選朝街面數與房型完全相符的方案，保留目錄順序
pub fn filter_candidates<'a>(
    catalog: &'a [PlanRecord],
    street_facing_sides: u8,
    apartment_type: ApartmentType,
) -> Vec<&'a PlanRecord> {
    catalog
        .iter()
        .filter(|plan| {
            plan.street_facing_sides == street_facing_sides
                && plan.apartment_type == apartment_type
        })
        .collect()
}

pub fn score_plan(plan: &PlanRecord, net_usable_area: u64, estimated_apartments: u64) -> ScoredPlan {
    let net = net_usable_area as f64;
    let estimated_total_area = plan.average_apartment_area * estimated_apartments as f64;
    let score = BASE_SCORE - (estimated_total_area - net).abs();
    let area_efficiency = if estimated_total_area > 0.0 {
        Some(net / estimated_total_area * 100.0)
    } else {
        None
    };

    ScoredPlan {
        plan: plan.clone(),
        score,
        estimated_total_area,
        area_efficiency,
        within_area_range: plan.area_range_contains(estimated_total_area),
    }
}

/// 分數最高者勝出；同分時取較早出現的候選
pub fn select_best_plan(
    candidates: &[&PlanRecord],
    net_usable_area: u64,
    estimated_apartments: u64,
) -> Option<ScoredPlan> {
    let mut best: Option<ScoredPlan> = None;
    for candidate in candidates {
        let scored = score_plan(candidate, net_usable_area, estimated_apartments);
        let better = best
            .as_ref()
            .map_or(true, |current| scored.score > current.score);
        if better {
            best = Some(scored);
        }
    }
    best
}

#[derive(Debug, Clone)]
pub struct PlanMatcher {
    catalog: Arc<Catalog>,
}

impl PlanMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn compute_net_usable_area(&self, total_base_area: f64, common_area_percentage: f64) -> u64 {
        compute_net_usable_area(total_base_area, common_area_percentage)
    }

    /// 依房型平均面積估計戶數
    ///
    /// 房型沒有設定平均面積時回傳 0。載入目錄時已確保被方案使用的房型都有平均值，
    /// 因此這裡只會發生在目錄中完全沒有該房型的情況，此時也不會有候選方案。
    pub fn estimate_apartment_count(&self, net_usable_area: u64, apartment_type: ApartmentType) -> u64 {
        match self.catalog.average_area(apartment_type) {
            Some(average) => (net_usable_area as f64 / average).floor() as u64,
            None => {
                tracing::warn!(
                    "No average area configured for apartment type {}, estimating 0 apartments",
                    apartment_type
                );
                0
            }
        }
    }

    pub fn filter_candidates(
        &self,
        street_facing_sides: u8,
        apartment_type: ApartmentType,
    ) -> Vec<&PlanRecord> {
        filter_candidates(self.catalog.plans(), street_facing_sides, apartment_type)
    }

    pub fn calculate_floor_plan(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        request.validate()?;

        let net_usable_area =
            compute_net_usable_area(request.total_base_area, request.common_area_percentage);
        let estimated_apartments =
            self.estimate_apartment_count(net_usable_area, request.apartment_type);
        let candidates = self.filter_candidates(request.street_facing_sides, request.apartment_type);
        let best_plan = select_best_plan(&candidates, net_usable_area, estimated_apartments);

        tracing::debug!(
            "Calculated: net={}m², apartments={}, candidates={}, best={:?}",
            net_usable_area,
            estimated_apartments,
            candidates.len(),
            best_plan.as_ref().map(|p| p.plan.id.as_str())
        );

        Ok(CalculationResult {
            total_base_area: request.total_base_area,
            common_area_percentage: request.common_area_percentage,
            net_usable_area,
            street_facing_sides: request.street_facing_sides,
            apartment_type: request.apartment_type,
            estimated_apartments,
            candidate_count: candidates.len(),
            best_plan,
            calculation_details: CalculationDetails {
                common_area: request.total_base_area * (request.common_area_percentage / 100.0),
                average_area_per_apartment: self
                    .catalog
                    .average_area(request.apartment_type)
                    .unwrap_or(0.0),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CatalogDocument;
    use serde_json::json;

    fn record(id: &str, sides: u8, apartment_type: ApartmentType, average: f64) -> PlanRecord {
        PlanRecord {
            id: id.to_string(),
            apartment_type,
            street_facing_sides: sides,
            min_usable_area: 0.0,
            max_usable_area: 1000.0,
            average_apartment_area: average,
            name: id.to_string(),
            description: String::new(),
            features: vec![],
            rooms: vec![],
            total_apartments: None,
        }
    }

    fn embedded_matcher() -> PlanMatcher {
        PlanMatcher::new(Arc::new(Catalog::embedded().unwrap()))
    }

    #[test]
    fn test_net_usable_area_rounds() {
        assert_eq!(compute_net_usable_area(500.0, 10.0), 450);
        assert_eq!(compute_net_usable_area(333.0, 15.0), 283); // 283.05
        assert_eq!(compute_net_usable_area(101.0, 50.0), 51); // 50.5
        assert_eq!(compute_net_usable_area(200.0, 0.0), 200);
    }

    #[test]
    fn test_net_usable_area_within_bounds() {
        for total in [1.0, 37.0, 250.0, 999.0, 12_345.0] {
            for pct in [0.0, 7.5, 25.0, 50.0] {
                let net = compute_net_usable_area(total, pct);
                assert!(net as f64 <= total, "{net} > {total}");
            }
        }
    }

    #[test]
    fn test_estimate_is_monotonic() {
        let matcher = embedded_matcher();
        for t in ApartmentType::ALL {
            let mut previous = 0;
            for net in (0..2000).step_by(7) {
                let count = matcher.estimate_apartment_count(net, t);
                assert!(count >= previous);
                previous = count;
            }
        }
    }

    #[test]
    fn test_estimate_without_average_returns_zero() {
        let document: CatalogDocument = serde_json::from_value(json!({
            "apartmentTypeAverages": { "2+1": { "averageArea": 85 } },
            "floorPlans": []
        }))
        .unwrap();
        let matcher = PlanMatcher::new(Arc::new(Catalog::from_document(document).unwrap()));
        assert_eq!(matcher.estimate_apartment_count(450, ApartmentType::FourPlusOne), 0);
        assert_eq!(matcher.estimate_apartment_count(450, ApartmentType::TwoPlusOne), 5);
    }

    #[test]
    fn test_filter_candidates_exact_match_in_order() {
        let plans = vec![
            record("a", 2, ApartmentType::TwoPlusOne, 85.0),
            record("b", 1, ApartmentType::TwoPlusOne, 85.0),
            record("c", 2, ApartmentType::ThreePlusOne, 115.0),
            record("d", 2, ApartmentType::TwoPlusOne, 90.0),
        ];
        let ids: Vec<&str> = filter_candidates(&plans, 2, ApartmentType::TwoPlusOne)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_select_best_plan_empty() {
        assert!(select_best_plan(&[], 450, 5).is_none());
    }

    #[test]
    fn test_select_best_plan_prefers_closest_area() {
        let far = record("far", 2, ApartmentType::TwoPlusOne, 70.0);
        let close = record("close", 2, ApartmentType::TwoPlusOne, 88.0);
        let best = select_best_plan(&[&far, &close], 450, 5).unwrap();
        assert_eq!(best.plan.id, "close");
        assert_eq!(best.estimated_total_area, 440.0);
        assert_eq!(best.score, 990.0);
    }

    #[test]
    fn test_select_best_plan_tie_goes_to_earlier() {
        // 400 與 500 距離 450 都是 50
        let under = record("under", 2, ApartmentType::TwoPlusOne, 80.0);
        let over = record("over", 2, ApartmentType::TwoPlusOne, 100.0);
        let best = select_best_plan(&[&under, &over], 450, 5).unwrap();
        assert_eq!(best.plan.id, "under");

        let best = select_best_plan(&[&over, &under], 450, 5).unwrap();
        assert_eq!(best.plan.id, "over");
    }

    #[test]
    fn test_select_best_plan_is_idempotent() {
        let plans = [
            record("a", 2, ApartmentType::TwoPlusOne, 80.0),
            record("b", 2, ApartmentType::TwoPlusOne, 95.0),
            record("c", 2, ApartmentType::TwoPlusOne, 100.0),
        ];
        let candidates: Vec<&PlanRecord> = plans.iter().collect();
        let first = select_best_plan(&candidates, 450, 5);
        let second = select_best_plan(&candidates, 450, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_goes_negative_for_large_mismatch() {
        let huge = record("huge", 2, ApartmentType::TwoPlusOne, 500.0);
        let scored = score_plan(&huge, 450, 5);
        assert_eq!(scored.score, 1000.0 - 2050.0);
        assert!(!scored.within_area_range);
    }

    #[test]
    fn test_area_efficiency_absent_without_apartments() {
        let plan = record("a", 2, ApartmentType::TwoPlusOne, 85.0);
        let scored = score_plan(&plan, 50, 0);
        assert_eq!(scored.estimated_total_area, 0.0);
        assert!(scored.area_efficiency.is_none());
    }

    #[test]
    fn test_calculate_floor_plan_reference_scenario() {
        let matcher = embedded_matcher();
        let request = CalculationRequest::new(500.0, 10.0, 2, ApartmentType::TwoPlusOne);
        let result = matcher.calculate_floor_plan(&request).unwrap();

        assert_eq!(result.net_usable_area, 450);
        assert_eq!(result.estimated_apartments, 5);
        assert_eq!(result.candidate_count, 2);
        assert_eq!(result.calculation_details.common_area, 50.0);
        assert_eq!(result.calculation_details.average_area_per_apartment, 85.0);

        let best = result.best_plan.unwrap();
        assert_eq!(best.plan.id, "plan_4");
        assert_eq!(best.score, 1000.0);
        assert_eq!(best.area_efficiency, Some(100.0));
        assert!(best.within_area_range);
    }

    #[test]
    fn test_calculate_floor_plan_rejects_invalid_percentage() {
        let matcher = embedded_matcher();
        let request = CalculationRequest::new(100.0, 60.0, 2, ApartmentType::TwoPlusOne);
        let err = matcher.calculate_floor_plan(&request).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_calculate_floor_plan_no_match_is_not_error() {
        let matcher = embedded_matcher();
        let request = CalculationRequest::new(800.0, 15.0, 4, ApartmentType::FourPlusOne);
        let result = matcher.calculate_floor_plan(&request).unwrap();
        assert_eq!(result.candidate_count, 0);
        assert!(result.best_plan.is_none());
        assert!(!result.has_match());
    }
}
