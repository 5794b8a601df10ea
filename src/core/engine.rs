use crate::adapters::report::catalog_report;
use crate::core::matcher::PlanMatcher;
use crate::domain::model::{CalculationRequest, CalculationResult};
use crate::domain::ports::{PlanRenderer, RenderContext, Storage};
use crate::utils::error::Result;

pub const RESULT_FILENAME: &str = "result.json";
pub const CATALOG_REPORT_FILENAME: &str = "catalog.csv";

#[derive(Debug, Clone)]
pub struct PlannerOutcome {
    pub result: CalculationResult,
    /// 有選中方案時寫出的檔案（相對於輸出根目錄）
    pub written_files: Vec<String>,
}

pub struct PlannerEngine<S: Storage, R: PlanRenderer> {
    matcher: PlanMatcher,
    storage: S,
    renderer: R,
}

impl<S: Storage, R: PlanRenderer> PlannerEngine<S, R> {
    pub fn new(matcher: PlanMatcher, storage: S, renderer: R) -> Self {
        Self {
            matcher,
            storage,
            renderer,
        }
    }

    /// 計算 → 渲染 → 寫檔
    pub async fn run(&self, request: &CalculationRequest) -> Result<PlannerOutcome> {
        tracing::info!(
            "📐 Calculating plan: {}m², {}% common, {} street side(s), {}",
            request.total_base_area,
            request.common_area_percentage,
            request.street_facing_sides,
            request.apartment_type
        );

        let result = self.matcher.calculate_floor_plan(request)?;
        tracing::info!(
            "Net usable area {}m², estimated {} apartments, {} candidate(s)",
            result.net_usable_area,
            result.estimated_apartments,
            result.candidate_count
        );

        let mut written_files = Vec::new();
        if let Some(best) = &result.best_plan {
            tracing::info!("🎯 Best plan: {} (score {:.1})", best.plan.id, best.score);

            let context = RenderContext {
                apartment_count: Some(result.estimated_apartments),
            };
            let diagram = self.renderer.render(&best.plan, &context);
            let diagram_path = format!("{}.{}", best.plan.id, self.renderer.file_extension());
            self.storage.write_file(&diagram_path, diagram.as_bytes()).await?;
            written_files.push(diagram_path);

            let json = serde_json::to_vec_pretty(&result)?;
            self.storage.write_file(RESULT_FILENAME, &json).await?;
            written_files.push(RESULT_FILENAME.to_string());
        } else {
            tracing::warn!("No plan matches the requested facade count and apartment type");
        }

        Ok(PlannerOutcome {
            result,
            written_files,
        })
    }

    /// 將目錄中每個方案輸出成圖檔，可選擇附上目錄清單
    pub async fn render_catalog(&self, include_report: bool) -> Result<Vec<String>> {
        let catalog = self.matcher.catalog();
        let mut written = Vec::with_capacity(catalog.len() + 1);

        for plan in catalog.plans() {
            let diagram = self.renderer.render(plan, &RenderContext::default());
            let path = format!("{}.{}", plan.id, self.renderer.file_extension());
            self.storage.write_file(&path, diagram.as_bytes()).await?;
            tracing::debug!("Rendered {}", path);
            written.push(path);
        }

        if include_report {
            let report = catalog_report(catalog, b',')?;
            self.storage
                .write_file(CATALOG_REPORT_FILENAME, report.as_bytes())
                .await?;
            written.push(CATALOG_REPORT_FILENAME.to_string());
        }

        tracing::info!("✅ Rendered {} plans", catalog.len());
        Ok(written)
    }
}
