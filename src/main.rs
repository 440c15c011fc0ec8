// ==========================================
// IP商品销量预测模拟器 - 命令行入口
// ==========================================
// 用法:
//   ip-sales-simulator <底表文件.xlsx|.csv> [config.json]
//   ip-sales-simulator dashboard <热度数据文件.xlsx|.csv> [config.json]
//
// 使用默认筛选跑一轮,结果以 JSON 输出到 stdout
// 环境变量 LOG_FORMAT=json 时日志以 JSON 输出
// ==========================================

use anyhow::Context;
use ip_sales_simulator::api::SimulationSession;
use ip_sales_simulator::config::{ConfigManager, SimulatorConfig};
use ip_sales_simulator::engine::{DashboardEngine, DashboardQuery};
use ip_sales_simulator::importer::{SalesImporter, SocialImporter};
use ip_sales_simulator::logging;

const USAGE: &str = "ip-sales-simulator [dashboard] <数据文件> [config.json]";

fn main() -> anyhow::Result<()> {
    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", ip_sales_simulator::APP_NAME, ip_sales_simulator::VERSION);

    let mut args = std::env::args().skip(1).peekable();
    let dashboard = args.next_if(|a| a == "dashboard").is_some();
    let data_path = args
        .next()
        .with_context(|| format!("缺少数据文件参数: {}", USAGE))?;

    let config = match args.next() {
        Some(path) => ConfigManager::load(&path)?,
        None => ConfigManager::load_default()?,
    }
    .into_config();

    if dashboard {
        run_dashboard(&data_path, &config)
    } else {
        run_simulation(&data_path, config)
    }
}

fn run_simulation(data_path: &str, config: SimulatorConfig) -> anyhow::Result<()> {
    let table = SalesImporter::new(config.sheet_name.clone())
        .import_file(data_path)
        .with_context(|| format!("无法导入底表: {}", data_path))?;

    let mut session = SimulationSession::new(table, config);
    tracing::info!(
        session = %session.session_id(),
        selection = ?session.selection(),
        target_week = session.target_week(),
        "使用默认筛选与目标周数推演"
    );
    let report = session.recompute();

    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run_dashboard(data_path: &str, config: &SimulatorConfig) -> anyhow::Result<()> {
    let table = SocialImporter::new(config.social_sheet_name.clone())
        .import_file(data_path)
        .with_context(|| format!("无法导入热度数据: {}", data_path))?;

    let query = DashboardQuery::defaults_for(&table);
    let outcome = DashboardEngine::new().build(&table, &query);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
