// ==========================================
// PV 设计评审引擎 - 命令行入口
// ==========================================
// 用法:
//   pv-review <bom.csv|bom.xlsx> <sld.pdf> <tmin_c|archive.json> [site label]
//
// Tmin 参数可为数值,或气象归档响应 JSON 文件（取第 1 百分位日最低温）
//
// 环境变量:
//   PV_REVIEW_CONFIG      JSON 配置文件路径（可选）
//   PV_REVIEW_LOG_FORMAT  设为 json 时输出 JSON 日志
// ==========================================

use anyhow::{bail, Context};
use pv_design_review::climate::design_tmin_from_archive_json;
use pv_design_review::config::ConfigManager;
use pv_design_review::{logging, ReviewApi};

/// 解析 Tmin 参数
fn resolve_tmin(arg: &str) -> anyhow::Result<f64> {
    let arg = arg.trim();
    if !arg.to_lowercase().ends_with(".json") {
        return arg
            .parse()
            .with_context(|| format!("Tmin 不是有效数值: {}", arg));
    }

    let raw = std::fs::read_to_string(arg)
        .with_context(|| format!("无法读取气象归档: {}", arg))?;
    let estimate = design_tmin_from_archive_json(&raw)
        .with_context(|| format!("气象归档格式错误: {}", arg))?;

    match estimate.tmin_c {
        Some(tmin) => {
            tracing::info!(tmin, method = %estimate.method, "设计 Tmin 由归档推导");
            Ok(tmin)
        }
        None => bail!("{}: {}", estimate.method, arg),
    }
}

fn main() -> anyhow::Result<()> {
    match std::env::var("PV_REVIEW_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("{} v{}", pv_design_review::APP_NAME, pv_design_review::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("用法: pv-review <bom.csv|bom.xlsx> <sld.pdf> <tmin_c|archive.json> [site label]");
    }

    let tmin = resolve_tmin(&args[2])?;
    let place = if args.len() > 3 {
        Some(args[3..].join(" "))
    } else {
        None
    };

    let manager = match std::env::var("PV_REVIEW_CONFIG") {
        Ok(path) => ConfigManager::from_file(&path)
            .with_context(|| format!("无法加载配置: {}", path))?,
        Err(_) => ConfigManager::new(),
    };

    let api = ReviewApi::from_config_manager(&manager)?;
    let outcome = api.review_files(&args[0], &args[1], tmin, place.as_deref())?;

    println!("{}", ReviewApi::payload_json(&outcome)?);
    println!();
    print!("{}", ReviewApi::text_report(&outcome));

    Ok(())
}
