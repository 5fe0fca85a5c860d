//! 排序工具模块
//!
//! 为差异树中的元素提供确定的全序：按名称，或按变化幅度降序再按名称。

use crate::diff::{ApiDiff, ClassDiff, MemberDiff, PackageDiff};
use crate::model::{Constructor, Field, Method, has_documentation};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 可按名称与变化幅度排序的差异元素
pub trait Ranked {
    fn rank_name(&self) -> &str;
    fn magnitude(&self) -> f64;
}

impl Ranked for PackageDiff {
    fn rank_name(&self) -> &str {
        &self.name
    }

    fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

impl Ranked for ClassDiff {
    fn rank_name(&self) -> &str {
        &self.name
    }

    fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Name,
    Magnitude,
}

pub fn by_name<T: Ranked>(a: &T, b: &T) -> Ordering {
    a.rank_name().cmp(b.rank_name())
}

/// 变化幅度大的在前，幅度相同按名称
pub fn by_magnitude<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.magnitude()
        .total_cmp(&a.magnitude())
        .then_with(|| by_name(a, b))
}

pub fn sort_by_name<T: Ranked>(items: &mut [T]) {
    items.sort_by(by_name);
}

pub fn sort_by_magnitude<T: Ranked>(items: &mut [T]) {
    items.sort_by(by_magnitude);
}

fn sort_ranked<T: Ranked>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Name => sort_by_name(items),
        SortOrder::Magnitude => sort_by_magnitude(items),
    }
}

/// 有文档的排在前面，仅作最后的平局裁决
fn documented_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    has_documentation(b).cmp(&has_documentation(a))
}

pub fn compare_methods(a: &Method, b: &Method) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.signature().cmp(&b.signature()))
        .then_with(|| documented_first(a.doc.as_deref(), b.doc.as_deref()))
}

pub fn compare_fields(a: &Field, b: &Field) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| documented_first(a.doc.as_deref(), b.doc.as_deref()))
}

pub fn compare_constructors(a: &Constructor, b: &Constructor) -> Ordering {
    a.signature
        .cmp(&b.signature)
        .then_with(|| documented_first(a.doc.as_deref(), b.doc.as_deref()))
}

pub fn compare_member_diffs(a: &MemberDiff, b: &MemberDiff) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.new_signature.cmp(&b.new_signature))
        .then_with(|| a.new_type.cmp(&b.new_type))
}

impl ClassDiff {
    /// 按名称排列所有成员列表
    pub fn sort_members(&mut self) {
        self.constructors_added.sort_by(compare_constructors);
        self.constructors_removed.sort_by(compare_constructors);
        self.constructors_changed.sort_by(compare_member_diffs);
        self.methods_added.sort_by(compare_methods);
        self.methods_removed.sort_by(compare_methods);
        self.methods_changed.sort_by(compare_member_diffs);
        self.fields_added.sort_by(compare_fields);
        self.fields_removed.sort_by(compare_fields);
        self.fields_changed.sort_by(compare_member_diffs);
    }
}

impl ApiDiff {
    /// 重新排列整棵差异树
    ///
    /// 变化的包与类型按 `order` 排列，新增与删除的元素以及成员总是按名称排列。
    pub fn sort(&mut self, order: SortOrder) {
        self.packages_added.sort_by(|a, b| a.name.cmp(&b.name));
        self.packages_removed.sort_by(|a, b| a.name.cmp(&b.name));
        for package in &mut self.packages_changed {
            package.types_added.sort_by(|a, b| a.name.cmp(&b.name));
            package.types_removed.sort_by(|a, b| a.name.cmp(&b.name));
            for class in &mut package.types_changed {
                class.sort_members();
            }
            sort_ranked(&mut package.types_changed, order);
        }
        sort_ranked(&mut self.packages_changed, order);
    }

    /// 所有变化的类型，按变化幅度降序再按全限定名排列
    pub fn ranked_classes(&self) -> Vec<(&str, &ClassDiff)> {
        let mut classes: Vec<(&str, &ClassDiff)> = self
            .packages_changed
            .iter()
            .flat_map(|p| p.types_changed.iter().map(move |c| (p.name.as_str(), c)))
            .collect();
        classes.sort_by(|(pa, a), (pb, b)| {
            b.magnitude
                .total_cmp(&a.magnitude)
                .then_with(|| pa.cmp(pb))
                .then_with(|| a.name.cmp(&b.name))
        });
        classes
    }
}
