// ==========================================
// 每日排程齐套模拟 - 命令行入口
// ==========================================
// 子命令:
// - init-db: 建立 ERP 快照表与配置表
// - inspect: 查看计划表的工作表/日期列/车间
// - run:     执行齐套分析并输出汇总
// - config:  查看/覆写表格布局配置
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kitting_sim::api::{export_report_json, export_results_csv, AnalysisRequest, KittingApi};
use kitting_sim::config::ConfigManager;
use kitting_sim::db::{default_db_path, ensure_schema, open_sqlite_connection, read_schema_version};
use kitting_sim::repository::{InventoryRepository, WorkOrderRepository};
use kitting_sim::DateLabel;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 每日排程齐套模拟：按排程顺序模拟领料，判定每行是否齐套
#[derive(Parser)]
#[command(name = "kitting-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 输出 debug 级别日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 日志输出为 JSON 行
    #[arg(long, global = true)]
    log_json: bool,

    /// SQLite 数据库路径（ERP 快照 + 配置）
    #[arg(long, global = true, env = "KITTING_SIM_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 建立数据库表结构（幂等）
    InitDb,

    /// 查看计划表结构
    Inspect {
        /// 计划表文件 (.xlsx/.xls/.xlsm/.ods/.csv)
        #[arg(short, long)]
        plan: PathBuf,

        /// 工作表名（缺省取第一张）
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// 执行齐套分析
    Run {
        /// 计划表文件
        #[arg(short, long)]
        plan: PathBuf,

        /// 工作表名（缺省取第一张）
        #[arg(short, long)]
        sheet: Option<String>,

        /// 分析日期 (YYYY-MM-DD / YYYY/M/D / M/D)
        #[arg(short, long)]
        date: DateLabel,

        /// 车间（缺省为全部车间）
        #[arg(short, long)]
        workshop: Option<String>,

        /// 逐行结果导出 CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// 完整报告导出 JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 配置管理
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 显示当前生效的表格布局
    Show,

    /// 覆写配置值（如 sheet.header_row）
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    kitting_sim::logging::init(cli.verbose, cli.log_json);

    let db_path = cli
        .db
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(default_db_path);
    tracing::debug!(db_path = %db_path, version = kitting_sim::VERSION, "启动");

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    ensure_schema(&conn).context("建表失败")?;

    match cli.command {
        Commands::InitDb => {
            let version = read_schema_version(&conn)?.unwrap_or_default();
            println!("database ready: {} (schema v{})", db_path, version);
        }
        Commands::Inspect { plan, sheet } => {
            let api = build_api(conn)?;
            let sheets = api.list_sheets(&plan)?;
            let dates = api.list_dates(&plan, sheet.as_deref()).await?;
            let workshops = api.list_workshops(&plan, sheet.as_deref()).await?;

            println!("sheets: {}", sheets.join(", "));
            println!(
                "dates: {}",
                dates.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
            );
            println!("workshops: {}", workshops.join(", "));
        }
        Commands::Run {
            plan,
            sheet,
            date,
            workshop,
            csv,
            json,
        } => {
            let api = build_api(conn)?;
            let request = AnalysisRequest {
                plan_path: plan,
                sheet,
                date,
                workshop,
            };
            let report = api.run_analysis(&request).await?;

            for line in report.short_lines() {
                println!(
                    "row {} {} [{}]: {}",
                    line.line_id, line.work_order, line.workshop, line.display_text
                );
            }
            println!("{}", report.summary_text());

            if let Some(path) = csv {
                export_results_csv(&path, &report)?;
            }
            if let Some(path) = json {
                export_report_json(&path, &report)?;
            }
        }
        Commands::Config { action } => {
            let config = ConfigManager::from_connection(Arc::new(Mutex::new(conn)))?;
            match action {
                ConfigCommands::Show => {
                    let layout = config.load_sheet_layout()?;
                    println!("{}", serde_json::to_string_pretty(&layout)?);
                }
                ConfigCommands::Set { key, value } => {
                    config.set_config_value(&key, &value)?;
                    println!("{} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

type SqliteKittingApi = KittingApi<ConfigManager, WorkOrderRepository, InventoryRepository>;

/// 三个依赖共用同一个连接
fn build_api(conn: Connection) -> Result<SqliteKittingApi> {
    let conn = Arc::new(Mutex::new(conn));
    let config = ConfigManager::from_connection(conn.clone())?;
    Ok(KittingApi::new(
        Arc::new(config),
        Arc::new(WorkOrderRepository::from_connection(conn.clone())),
        Arc::new(InventoryRepository::from_connection(conn)),
    ))
}
