//! 差异请求模块
//!
//! 把"解析继承、再比较"这一完整流程包装成一次调用。

use crate::diff::ApiDiff;
use crate::differ::ApiComparator;
use crate::error::{ApiDiffError, Result};
use crate::model::Surface;
use crate::options::DiffOptions;
use crate::resolver::{InheritanceResolver, ResolutionStats};
use tracing::{debug, info};

/// 一次两版本比较的请求
///
/// 两个接口面都必须设置，之后由 [`DiffRequest::run`] 先分别解析继承再比较。
#[derive(Debug, Clone, Default)]
pub struct DiffRequest {
    old: Option<Surface>,
    new: Option<Surface>,
    options: DiffOptions,
}

impl DiffRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_old(mut self, surface: Surface) -> Self {
        self.old = Some(surface);
        self
    }

    pub fn with_new(mut self, surface: Surface) -> Self {
        self.new = Some(surface);
        self
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// 解析两个接口面的继承并比较
    ///
    /// 两个版本的继承解析互不依赖，使用 `rayon::join` 并行执行。
    pub fn run(self) -> Result<ApiDiff> {
        let mut old = self
            .old
            .ok_or_else(|| ApiDiffError::ConfigError("old surface is not set".to_string()))?;
        let mut new = self
            .new
            .ok_or_else(|| ApiDiffError::ConfigError("new surface is not set".to_string()))?;

        info!("Comparing API '{}' with '{}'", old.name, new.name);

        let resolver = InheritanceResolver::new();
        let (old_stats, new_stats) =
            rayon::join(|| resolver.resolve(&mut old), || resolver.resolve(&mut new));
        log_resolution(&old.name, &old_stats?);
        log_resolution(&new.name, &new_stats?);

        ApiComparator::new(self.options).compare(&old, &new)
    }
}

fn log_resolution(surface: &str, stats: &ResolutionStats) {
    debug!(
        "Resolved '{}': {} types extended, {} methods and {} fields inherited",
        surface, stats.types_extended, stats.methods_inherited, stats.fields_inherited
    );
}
