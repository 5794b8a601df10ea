use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 終端機精簡輸出；`--verbose` 優先於設定檔的等級
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let level = if verbose {
        "debug"
    } else {
        level.unwrap_or("info")
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn cli_directive(level: &str) -> String {
    // debug 以上才把依賴套件的 info 一起帶出來
    if level == "debug" || level == "trace" {
        format!("floorplan_matcher={},info", level)
    } else {
        format!("floorplan_matcher={}", level)
    }
}

/// 以 JSON 格式輸出日誌，給批次作業或日誌收集器使用
pub fn init_json_logger(level: Option<&str>) {
    let default_directive = format!("floorplan_matcher={}", level.unwrap_or("info"));
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
