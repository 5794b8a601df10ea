use clap::Parser;
use floorplan_matcher::adapters::report::catalog_report;
use floorplan_matcher::core::ConfigProvider;
use floorplan_matcher::utils::{logger, validation::Validate};
use floorplan_matcher::{
    catalog_source_from_location, load_catalog, ApartmentType, Catalog, LocalStorage, PlanMatcher,
    PlannerEngine, SvgPlanRenderer, TomlConfig,
};

#[derive(Parser)]
#[command(name = "plan-catalog")]
#[command(about = "Render every catalog plan and export a catalog report")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "plan-catalog.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override catalog source from config
    #[arg(long)]
    catalog: Option<String>,

    /// Dry run - list what would be rendered without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting plan catalog tool");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(catalog) = args.catalog {
        tracing::info!("🔧 Catalog source overridden to: {}", catalog);
        config.catalog.source = catalog;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let source = catalog_source_from_location(config.catalog_location(), config.timeout_seconds())?;
    let catalog = match load_catalog(source.as_ref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Failed to load catalog: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    display_catalog_summary(&catalog, &config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&catalog)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let renderer = SvgPlanRenderer::new(config.render_width(), config.render_height());
    let engine = PlannerEngine::new(PlanMatcher::new(catalog), storage, renderer);

    let written = engine.render_catalog(config.report_enabled()).await?;

    println!("✅ Rendered {} files into {}", written.len(), config.output_path());
    for file in &written {
        println!("   📄 {}", file);
    }

    Ok(())
}

fn display_catalog_summary(catalog: &Catalog, config: &TomlConfig) {
    tracing::info!("📋 Catalog summary:");
    tracing::info!("  Source: {}", config.catalog_location());
    tracing::info!("  Plans: {}", catalog.len());
    for apartment_type in ApartmentType::ALL {
        let count = catalog.plans_by_type(apartment_type).len();
        let average = catalog
            .average_area(apartment_type)
            .map(|a| format!("{} m²", a))
            .unwrap_or_else(|| "not configured".to_string());
        tracing::info!("  {}: {} plan(s), average {}", apartment_type, count, average);
    }
    tracing::info!(
        "  Output: {} ({}x{})",
        config.output_path(),
        config.render_width(),
        config.render_height()
    );
}

fn perform_dry_run(catalog: &Catalog) -> anyhow::Result<()> {
    println!("🔍 Plans that would be rendered:");
    print!("{}", catalog_report(catalog, b'\t')?);
    Ok(())
}
