//! 变化幅度计算模块
//!
//! 为每个变化的类型、包以及整个 API 计算 0 到 100 的差异分数，用于排序。
//!
//! - 类型分数：(新增 + 删除 + 2 × 结构性修改 + 2 × [类型本身有变化]) 除以
//!   (旧成员数 + 新成员数 + 2 × [类型本身有变化])
//! - 包分数：被删除和新增类型按全部权重计入，变化的类型按分数折算权重，
//!   除以新旧两个版本包的总权重
//! - API 分数：以同样方式在包一级聚合

use crate::diff::{ApiDiff, ClassDiff, PackageDiff};
use crate::model::{Package, TypeDecl};

/// 成员数对应的权重，空类型也至少计 1
pub fn member_weight(member_count: usize) -> usize {
    member_count.max(1)
}

pub fn type_weight(decl: &TypeDecl) -> usize {
    member_weight(decl.member_count())
}

pub fn package_weight(package: &Package) -> usize {
    package.types.iter().map(type_weight).sum::<usize>().max(1)
}

fn percentage(differing: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (100.0 * differing / total).clamp(0.0, 100.0)
    }
}

/// 变化幅度计算器
#[derive(Debug, Default, Clone, Copy)]
pub struct MagnitudeCalculator;

impl MagnitudeCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn score_class(&self, diff: &ClassDiff) -> f64 {
        let header = if diff.has_class_level_change() { 2 } else { 0 };
        let differing =
            diff.added_count() + diff.removed_count() + 2 * diff.structural_changed_count() + header;
        let total = diff.old_member_count + diff.new_member_count + header;
        percentage(differing as f64, total as f64)
    }

    pub fn score_package(&self, diff: &PackageDiff) -> f64 {
        let replaced: usize = diff
            .types_removed
            .iter()
            .chain(diff.types_added.iter())
            .map(type_weight)
            .sum();
        let changed: f64 = diff
            .types_changed
            .iter()
            .map(|class| {
                let weight =
                    member_weight(class.old_member_count) + member_weight(class.new_member_count);
                self.score_class(class) / 100.0 * weight as f64
            })
            .sum();
        percentage(
            replaced as f64 + changed,
            (diff.old_weight + diff.new_weight) as f64,
        )
    }

    pub fn score_api(&self, diff: &ApiDiff) -> f64 {
        let replaced: usize = diff
            .packages_removed
            .iter()
            .chain(diff.packages_added.iter())
            .map(package_weight)
            .sum();
        let changed: f64 = diff
            .packages_changed
            .iter()
            .map(|package| {
                self.score_package(package) / 100.0
                    * (package.old_weight + package.new_weight) as f64
            })
            .sum();
        percentage(
            replaced as f64 + changed,
            (diff.old_weight + diff.new_weight) as f64,
        )
    }

    /// 为差异树中每个类型、包以及整体填写分数
    pub fn annotate(&self, diff: &mut ApiDiff) {
        for package in &mut diff.packages_changed {
            for class in &mut package.types_changed {
                class.magnitude = self.score_class(class);
            }
            package.magnitude = self.score_package(package);
        }
        diff.magnitude = self.score_api(diff);
    }
}
