// ==========================================
// 批次腌制排产系统 - 命令行入口
// ==========================================
// 用法:
//   lot-intake-aps <lots.csv|lots.xlsx> [--config cfg.json] [--out plan.csv]
//                  [--stabilization-out estab.csv] [--load-out loads.csv] [--log-json]
// 未指定 --out 时排产结果写到标准输出
// ==========================================

use anyhow::{bail, Context, Result};
use lot_intake_aps::config::ConfigLoader;
use lot_intake_aps::engine::PlanOrchestrator;
use lot_intake_aps::export::{write_load_summary_csv, write_plan_csv, write_stabilization_csv};
use lot_intake_aps::importer::LotImporter;
use lot_intake_aps::logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;

const USAGE: &str = "用法: lot-intake-aps <lots.csv|lots.xlsx> [--config cfg.json] [--out plan.csv] \
[--stabilization-out estab.csv] [--load-out loads.csv] [--log-json]";

#[derive(Debug, Default)]
struct CliArgs {
    lots_path: PathBuf,
    config_path: Option<PathBuf>,
    plan_out: Option<PathBuf>,
    stabilization_out: Option<PathBuf>,
    load_out: Option<PathBuf>,
    log_json: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    let mut lots_path = None;

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| -> Result<PathBuf> {
            args.next()
                .map(PathBuf::from)
                .with_context(|| format!("{} 缺少参数值\n{}", flag, USAGE))
        };
        match arg.as_str() {
            "--config" => parsed.config_path = Some(value_for("--config")?),
            "--out" => parsed.plan_out = Some(value_for("--out")?),
            "--stabilization-out" => parsed.stabilization_out = Some(value_for("--stabilization-out")?),
            "--load-out" => parsed.load_out = Some(value_for("--load-out")?),
            "--log-json" => parsed.log_json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            other => {
                if lots_path.replace(PathBuf::from(other)).is_some() {
                    bail!("只能指定一个批次文件\n{}", USAGE);
                }
            }
        }
    }

    parsed.lots_path = lots_path.with_context(|| format!("缺少批次文件\n{}", USAGE))?;
    Ok(parsed)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = lot_intake_aps::VERSION, "{}", lot_intake_aps::APP_NAME);

    // 配置非法时直接失败，不做任何排产
    let config = ConfigLoader::load_or_default(args.config_path.as_ref())
        .context("读取排产配置失败")?;
    let settings = config.validate().context("排产配置校验失败")?;

    let lots = LotImporter::new()
        .import_from_file(&args.lots_path)
        .with_context(|| format!("导入批次文件失败: {}", args.lots_path.display()))?;

    let result = PlanOrchestrator::new().run(lots, &settings);

    match &args.plan_out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("无法创建文件: {}", path.display()))?;
            write_plan_csv(file, &result.lots)?;
        }
        None => write_plan_csv(io::stdout().lock(), &result.lots)?,
    }

    if let Some(path) = &args.stabilization_out {
        let file = File::create(path)
            .with_context(|| format!("无法创建文件: {}", path.display()))?;
        write_stabilization_csv(file, &result.stabilization_report)?;
    }

    if let Some(path) = &args.load_out {
        let file = File::create(path)
            .with_context(|| format!("无法创建文件: {}", path.display()))?;
        write_load_summary_csv(file, &result.load_summary)?;
    }

    tracing::info!(
        run_id = %result.run_id,
        total = result.summary.total,
        unfit = result.summary.unfit,
        "排产完成"
    );
    Ok(())
}
