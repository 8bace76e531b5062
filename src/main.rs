// ==========================================
// 库存需求投影看板 - 命令行入口
// ==========================================
// 用法: product-projection [FILE.json] [YYYY-MM-DD]
// 未指定文件时加载内置演示数据;汇总输出到 stdout,日志输出到 stderr
// 日志: RUST_LOG 控制级别,PRODUCT_PROJECTION_LOG_FORMAT=json 输出 JSON 行
// ==========================================

use anyhow::{Context, Result};
use product_projection::api::ProjectionApi;
use product_projection::config::{default_config_path, ConfigManager};
use product_projection::domain::parse_calendar_date;
use product_projection::i18n;

#[tokio::main]
async fn main() -> Result<()> {
    product_projection::logging::init_from_env();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", product_projection::APP_NAME, product_projection::VERSION);
    match default_config_path() {
        Some(path) => tracing::info!("配置文件: {}", path.display()),
        None => tracing::info!("配置文件: 无可用配置目录，使用默认配置"),
    }
    tracing::info!("==================================================");

    let mut file: Option<String> = None;
    let mut date: Option<String> = None;
    for arg in std::env::args().skip(1) {
        if parse_calendar_date(&arg).is_some() {
            date = Some(arg);
        } else if file.is_none() {
            file = Some(arg);
        } else {
            anyhow::bail!("用法: product-projection [FILE.json] [YYYY-MM-DD]");
        }
    }

    let config = ConfigManager::load_default().projection_config();
    tracing::info!(edit_mode = %config.edit_mode, locale = %config.locale, "配置已加载");
    i18n::set_locale(&config.locale);
    let mut api = ProjectionApi::new(config);

    let report = match &file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("无法读取数据文件: {}", path))?;
            api.load_json(&raw)
        }
        None => {
            tracing::info!("未指定数据文件，使用内置演示数据");
            api.load_demo_data()
        }
    };

    if let Some(err) = &report.document_error {
        tracing::warn!(error = %err, "数据文档无法解析");
    }

    if let Some(d) = &date {
        api.select_date(d)?;
    }

    // 大数据量时经 worker 重算,结果与同步计算一致
    api.summarize_offloaded().await?;

    print_summary(&api);
    Ok(())
}

fn print_summary(api: &ProjectionApi) {
    let locale = api.locale();
    let store = api.store();

    if store.products().is_empty() {
        println!("{}", i18n::t_in("cli.no_data", locale));
        return;
    }

    let dates = store.dates().len().to_string();
    let count = store.products().len().to_string();
    println!(
        "{}",
        i18n::t_with_args("cli.loaded", locale, &[("count", &count), ("dates", &dates)])
    );

    let view = api.summary();
    println!();
    println!("{} ({})", view.title, view.scope);
    for entry in &view.entries {
        println!("  {:<8} {:>6} {:>4}%", entry.label, entry.count, entry.percentage);
    }
    println!("  {:<8} {:>6}", i18n::t_in("summary.total", locale), view.total);

    let grid = api.grid();
    println!();
    println!(
        "{}: {}  {}: {}",
        i18n::t_in("grid.reference", locale),
        grid.rows.len(),
        i18n::t_in("grid.dates", locale),
        grid.dates.len()
    );
}
