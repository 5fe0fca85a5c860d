//! api-diff - 结构化 API 差异分析工具
//!
//! 比较同一个库两个版本的接口面，输出 JSON 格式的差异树。

mod cli;

use api_diff_core::{ApiDiffError, DiffRequest, Result, Surface};
use cli::{Cli, Config, ReportArg};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // 解析命令行参数
    let cli = Cli::parse_args();

    // 初始化日志记录，日志写到 stderr 以免混入 JSON 输出
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 验证参数
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    let config: Config = cli.into();

    if config.verbose {
        info!("Starting api-diff analysis");
        debug!(
            "Configuration: old={}, new={}, order={:?}",
            config.old_path.display(),
            config.new_path.display(),
            config.order
        );
    }

    // 运行主要逻辑
    if let Err(e) = run(config) {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("Analysis completed successfully");
}

/// 读取并反序列化一个接口面文件
fn load_surface(path: &Path) -> Result<Surface> {
    let content = fs::read_to_string(path)?;
    let surface: Surface = serde_json::from_str(&content).map_err(|e| {
        ApiDiffError::SerializationError(format!("Failed to parse {}: {e}", path.display()))
    })?;
    debug!(
        "Loaded surface '{}' from {}: {} types, {} members",
        surface.name,
        path.display(),
        surface.type_count(),
        surface.member_count()
    );
    Ok(surface)
}

/// 主要应用逻辑
fn run(config: Config) -> Result<()> {
    let old = load_surface(&config.old_path)?;
    let new = load_surface(&config.new_path)?;

    let mut diff = DiffRequest::new()
        .with_old(old)
        .with_new(new)
        .with_options(config.options)
        .run()?;
    diff.sort(config.order);

    let stats = diff.statistics();
    info!(
        "{} packages, {} types and {} members changed; magnitude {:.1}",
        stats.packages_added + stats.packages_removed + stats.packages_changed,
        stats.types_added + stats.types_removed + stats.types_changed,
        stats.members_added + stats.members_removed + stats.members_changed,
        diff.magnitude
    );

    let rendered = match config.report {
        ReportArg::Diff => serde_json::to_string_pretty(&diff),
        ReportArg::Stats => serde_json::to_string_pretty(&stats),
    }
    .map_err(|e| ApiDiffError::SerializationError(e.to_string()))?;

    match &config.output_file {
        Some(path) => {
            fs::write(path, rendered + "\n")?;
            info!("Wrote report to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
