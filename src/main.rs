use clap::Parser;
use floorplan_matcher::core::ConfigProvider;
use floorplan_matcher::utils::error::{ErrorSeverity, PlannerError};
use floorplan_matcher::utils::{logger, validation::Validate};
use floorplan_matcher::{
    catalog_source_from_location, load_catalog, CalculationResult, CliConfig, LocalStorage,
    PlanMatcher, PlannerEngine, SvgPlanRenderer,
};

fn exit_code(e: &PlannerError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 2,      // 輸入錯誤
        ErrorSeverity::Medium => 4,   // 網路錯誤，可重試
        ErrorSeverity::High => 1,     // 設定或目錄錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn fail(e: PlannerError) -> ! {
    tracing::error!(
        "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn print_summary(result: &CalculationResult) {
    println!("📊 Net usable area: {} m²", result.net_usable_area);
    println!(
        "🏠 Estimated apartments: {} ({} m² average)",
        result.estimated_apartments, result.calculation_details.average_area_per_apartment
    );
    println!("🔎 Candidate plans: {}", result.candidate_count);

    match &result.best_plan {
        Some(best) => {
            println!("✅ Suggested plan: {} ({})", best.plan.name, best.plan.id);
            println!("   {}", best.plan.description);
            println!(
                "   Score {:.1}, estimated total {:.1} m²",
                best.score, best.estimated_total_area
            );
            if let Some(efficiency) = best.area_efficiency {
                println!("   Area efficiency {:.1}%", efficiency);
            }
            for feature in &best.plan.features {
                println!("   • {}", feature);
            }
        }
        None => println!(
            "❌ No plan for {} with {} street-facing side(s)",
            result.apartment_type, result.street_facing_sides
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting floorplan CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }
    let request = config.to_request().unwrap_or_else(|e| fail(e));

    let source = catalog_source_from_location(config.catalog_location(), None)
        .unwrap_or_else(|e| fail(e));
    let catalog = load_catalog(source.as_ref()).await.unwrap_or_else(|e| fail(e));
    let matcher = PlanMatcher::new(catalog);

    let result = if config.no_write {
        matcher.calculate_floor_plan(&request).unwrap_or_else(|e| fail(e))
    } else {
        let storage = LocalStorage::new(config.output_path().to_string());
        let renderer = SvgPlanRenderer::new(config.render_width(), config.render_height());
        let engine = PlannerEngine::new(matcher, storage, renderer);
        let outcome = engine.run(&request).await.unwrap_or_else(|e| fail(e));
        for file in &outcome.written_files {
            tracing::info!("📁 Output saved to: {}/{}", config.output_path(), file);
        }
        outcome.result
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}
