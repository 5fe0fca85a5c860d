//! 批量比较模块
//!
//! 在专用的 rayon 线程池中并发处理多组版本对，每一组的结果独立返回。

use crate::diff::ApiDiff;
use crate::error::{ApiDiffError, Result};
use crate::model::Surface;
use crate::options::DiffOptions;
use crate::request::DiffRequest;
use rayon::prelude::*;
use tracing::{info, warn};

/// 并发批量比较器
#[derive(Debug, Clone)]
pub struct BatchComparator {
    /// 线程池大小
    thread_pool_size: usize,
    options: DiffOptions,
}

impl Default for BatchComparator {
    fn default() -> Self {
        Self {
            thread_pool_size: num_cpus::get(),
            options: DiffOptions::default(),
        }
    }
}

impl BatchComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置线程池大小，0 视为 1
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = size.max(1);
        self
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn thread_pool_size(&self) -> usize {
        self.thread_pool_size
    }

    /// 比较每一组 (旧, 新) 接口面
    ///
    /// 只有线程池创建失败时整体返回错误；单组失败不影响其他组，结果顺序与输入一致。
    pub fn compare_all(&self, pairs: Vec<(Surface, Surface)>) -> Result<Vec<Result<ApiDiff>>> {
        info!(
            "Comparing {} surface pairs on {} threads",
            pairs.len(),
            self.thread_pool_size
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.thread_pool_size)
            .build()
            .map_err(|e| {
                ApiDiffError::ThreadPoolError(format!("Failed to create thread pool: {e}"))
            })?;

        let results: Vec<Result<ApiDiff>> = pool.install(|| {
            pairs
                .into_par_iter()
                .map(|(old, new)| {
                    DiffRequest::new()
                        .with_old(old)
                        .with_new(new)
                        .with_options(self.options.clone())
                        .run()
                })
                .collect()
        });

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} comparisons failed", failed, results.len());
        }
        Ok(results)
    }
}
