use crate::core::catalog::Catalog;
use crate::utils::error::{PlannerError, Result};

pub const REPORT_HEADER: [&str; 7] = [
    "id",
    "apartment_type",
    "street_facing_sides",
    "min_usable_area",
    "max_usable_area",
    "average_apartment_area",
    "name",
];

/// 目錄清單（CSV 或 TSV）
pub fn catalog_report(catalog: &Catalog, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for plan in catalog.plans() {
        writer.write_record([
            plan.id.clone(),
            plan.apartment_type.to_string(),
            plan.street_facing_sides.to_string(),
            plan.min_usable_area.to_string(),
            plan.max_usable_area.to_string(),
            plan.average_apartment_area.to_string(),
            plan.name.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlannerError::catalog(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_report_has_header_and_row_per_plan() {
        let catalog = Catalog::embedded().unwrap();
        let report = catalog_report(&catalog, b',').unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], REPORT_HEADER.join(","));
        assert_eq!(lines.len(), catalog.len() + 1);
        assert!(lines[1].starts_with("plan_1,1+1,1,120,400,58,"));
    }

    #[test]
    fn test_tsv_report_uses_tabs() {
        let catalog = Catalog::embedded().unwrap();
        let report = catalog_report(&catalog, b'\t').unwrap();
        assert!(report.lines().next().unwrap().contains("id\tapartment_type"));
    }
}
