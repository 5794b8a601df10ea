use crate::domain::model::{CatalogDocument, PlanRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// "embedded"、檔案路徑或 http(s) URL
    fn catalog_location(&self) -> &str;
    fn output_path(&self) -> &str;
    fn render_width(&self) -> u32;
    fn render_height(&self) -> u32;
}

/// 目錄來源：啟動時讀取一次
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogDocument>;
    fn describe(&self) -> String;
}

/// 渲染時額外提供的資訊
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    /// 計算得到的戶數；沒有時改用方案自帶的 totalApartments
    pub apartment_count: Option<u64>,
}

pub trait PlanRenderer: Send + Sync {
    fn render(&self, plan: &PlanRecord, context: &RenderContext) -> String;
    fn file_extension(&self) -> &'static str;
}
