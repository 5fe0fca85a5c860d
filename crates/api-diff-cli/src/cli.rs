//! 命令行接口模块
//!
//! 提供命令行参数解析和参数校验

use api_diff_core::{ApiDiffError, DiffOptions, Result, SortOrder, Visibility};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// api-diff - 结构化 API 差异分析工具
///
/// 读取两个 JSON 格式的接口面描述，解析继承成员后比较，
/// 输出带变化幅度评分的差异树。
#[derive(Parser, Debug)]
#[command(name = "api-diff")]
#[command(author = "api-diff contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compare two versions of a library's API surface")]
#[command(
    long_about = "api-diff compares two JSON API surface descriptions (packages, types, constructors, methods and fields), resolves inherited members, and reports what was added, removed or changed along with a 0-100 magnitude score for every changed type, package and the API as a whole."
)]
pub struct Cli {
    /// 旧版本接口面
    #[arg(long = "old", value_name = "FILE", help = "JSON surface of the old API version")]
    pub old: PathBuf,

    /// 新版本接口面
    #[arg(long = "new", value_name = "FILE", help = "JSON surface of the new API version")]
    pub new: PathBuf,

    /// 报告所有变化
    #[arg(
        long = "show-all-changes",
        help = "Also report native, synchronized and parameter name changes"
    )]
    pub show_all_changes: bool,

    /// 报告文档的增删
    #[arg(long = "doc-changes", help = "Report documentation being added or removed")]
    pub doc_changes: bool,

    /// 只报告不兼容的变化
    #[arg(long = "incompatible", help = "Ignore deprecation-only changes")]
    pub incompatible: bool,

    /// 类型可见性下限
    #[arg(
        long = "exclude-class",
        value_enum,
        default_value_t = VisibilityArg::Private,
        value_name = "LEVEL",
        help = "Skip types less visible than this level"
    )]
    pub exclude_class: VisibilityArg,

    /// 成员可见性下限
    #[arg(
        long = "exclude-member",
        value_enum,
        default_value_t = VisibilityArg::Private,
        value_name = "LEVEL",
        help = "Skip members less visible than this level"
    )]
    pub exclude_member: VisibilityArg,

    /// 排序方式
    #[arg(
        long = "order",
        value_enum,
        default_value_t = SortOrderArg::Name,
        help = "Ordering of changed packages and types"
    )]
    pub order: SortOrderArg,

    /// 输出内容
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = ReportArg::Diff,
        help = "What to print: the full diff tree or only change counts"
    )]
    pub format: ReportArg,

    /// 详细输出
    #[arg(short = 'v', long = "verbose", help = "Enable verbose logging output")]
    pub verbose: bool,

    /// 输出到文件
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write output to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,
}

/// 可见性命令行参数
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VisibilityArg {
    #[value(name = "private")]
    Private,
    #[value(name = "package")]
    Package,
    #[value(name = "protected")]
    Protected,
    #[value(name = "public")]
    Public,
}

/// 排序方式命令行参数
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortOrderArg {
    /// 按名称
    #[value(name = "name")]
    Name,
    /// 按变化幅度降序
    #[value(name = "magnitude")]
    Magnitude,
}

/// 输出内容命令行参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportArg {
    /// 完整的差异树
    #[value(name = "diff")]
    Diff,
    /// 各层级的增删改计数
    #[value(name = "stats")]
    Stats,
}

/// 应用程序配置信息
#[derive(Debug, Clone)]
pub struct Config {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub options: DiffOptions,
    pub order: SortOrder,
    pub report: ReportArg,
    /// 是否启用详细输出
    pub verbose: bool,
    pub output_file: Option<PathBuf>,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Private => Visibility::Private,
            VisibilityArg::Package => Visibility::Package,
            VisibilityArg::Protected => Visibility::Protected,
            VisibilityArg::Public => Visibility::Public,
        }
    }
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Name => SortOrder::Name,
            SortOrderArg::Magnitude => SortOrder::Magnitude,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let options = DiffOptions::new()
            .with_show_all_changes(cli.show_all_changes)
            .with_documentation_diffs(cli.doc_changes)
            .with_incompatible_changes_only(cli.incompatible)
            .with_class_visibility(cli.exclude_class.into())
            .with_member_visibility(cli.exclude_member.into());
        Config {
            old_path: cli.old,
            new_path: cli.new,
            options,
            order: cli.order.into(),
            report: cli.format,
            verbose: cli.verbose,
            output_file: cli.output_file,
        }
    }
}

impl Cli {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 验证参数的有效性
    pub fn validate(&self) -> Result<()> {
        for path in [&self.old, &self.new] {
            if !path.is_file() {
                return Err(ApiDiffError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Surface file does not exist: {}", path.display()),
                )));
            }
        }

        // 输出文件的父目录不存在时创建
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ApiDiffError::IoError(std::io::Error::new(
                            e.kind(),
                            format!(
                                "Failed to create output directory {}: {}",
                                parent.display(),
                                e
                            ),
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}
