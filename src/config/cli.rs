use crate::adapters::svg::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::core::ConfigProvider;
use crate::domain::model::{ApartmentType, CalculationRequest};
use crate::utils::error::Result;
use crate::utils::validation::{
    is_http_location, validate_path, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "floorplan")]
#[command(about = "Suggest a predefined apartment floor plan for a building footprint")]
pub struct CliConfig {
    /// Total footprint area in m²
    #[arg(long)]
    pub total_area: f64,

    /// Common-area share of the footprint, 0-50
    #[arg(long, default_value = "10")]
    pub common_area: f64,

    /// Number of street-facing facades, 1-4
    #[arg(long, default_value = "1")]
    pub street_sides: u8,

    /// Apartment type: 1+1, 2+1, 3+1 or 4+1
    #[arg(long = "type", default_value = "2+1")]
    pub apartment_type: String,

    /// "embedded", a JSON file path or an http(s) URL
    #[arg(long, default_value = "embedded")]
    pub catalog: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    #[arg(long, help = "Print the calculation as JSON")]
    pub json: bool,

    #[arg(long, help = "Skip writing SVG and JSON output files")]
    pub no_write: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_request(&self) -> Result<CalculationRequest> {
        let apartment_type: ApartmentType = self.apartment_type.parse()?;
        let request = CalculationRequest::new(
            self.total_area,
            self.common_area,
            self.street_sides,
            apartment_type,
        );
        request.validate()?;
        Ok(request)
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_location(&self) -> &str {
        &self.catalog
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn render_width(&self) -> u32 {
        self.width
    }

    fn render_height(&self) -> u32 {
        self.height
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("width", self.width, 1)?;
        validate_positive_number("height", self.height, 1)?;
        if is_http_location(&self.catalog) {
            validate_url("catalog", &self.catalog)?;
        }
        self.to_request().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_into_request() {
        let config = CliConfig::parse_from([
            "floorplan",
            "--total-area",
            "500",
            "--common-area",
            "10",
            "--street-sides",
            "2",
            "--type",
            "2+1",
        ]);

        assert!(config.validate().is_ok());
        let request = config.to_request().unwrap();
        assert_eq!(request.apartment_type, ApartmentType::TwoPlusOne);
        assert_eq!(config.catalog_location(), "embedded");
        assert_eq!(config.render_width(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_http_prefixed_path_is_not_a_url() {
        let config = CliConfig::parse_from([
            "floorplan",
            "--total-area",
            "500",
            "--catalog",
            "httpdocs/catalog.json",
        ]);
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from([
            "floorplan",
            "--total-area",
            "500",
            "--catalog",
            "https://",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_type_fails_validation() {
        let config = CliConfig::parse_from(["floorplan", "--total-area", "500", "--type", "6+1"]);
        assert!(config.validate().is_err());
    }
}
