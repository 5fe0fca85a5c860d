//! 比较选项模块
//!
//! 比较选项作为显式配置传给比较器，不同设置的多次比较可以并存。

use crate::model::{Modifiers, TypeDecl, Visibility};
use serde::{Deserialize, Serialize};

/// 差异比较选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// 是否将 native/synchronized 标记以及参数名的变化视为变更
    pub show_all_changes: bool,
    /// 是否将文档有无的变化单独视为变更
    pub include_documentation_diffs: bool,
    /// 只报告不兼容的变化（忽略废弃标记的变化）
    pub incompatible_changes_only: bool,
    /// 可见性低于此级别的类型在两侧都被忽略
    pub class_visibility: Visibility,
    /// 可见性低于此级别的成员在两侧都被忽略
    pub member_visibility: Visibility,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            show_all_changes: false,
            include_documentation_diffs: false,
            incompatible_changes_only: false,
            class_visibility: Visibility::Private,
            member_visibility: Visibility::Private,
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_all_changes(mut self, enabled: bool) -> Self {
        self.show_all_changes = enabled;
        self
    }

    pub fn with_documentation_diffs(mut self, enabled: bool) -> Self {
        self.include_documentation_diffs = enabled;
        self
    }

    pub fn with_incompatible_changes_only(mut self, enabled: bool) -> Self {
        self.incompatible_changes_only = enabled;
        self
    }

    pub fn with_class_visibility(mut self, level: Visibility) -> Self {
        self.class_visibility = level;
        self
    }

    pub fn with_member_visibility(mut self, level: Visibility) -> Self {
        self.member_visibility = level;
        self
    }

    pub(crate) fn includes_type(&self, decl: &TypeDecl) -> bool {
        decl.modifiers.visibility >= self.class_visibility
    }

    pub(crate) fn includes_member(&self, modifiers: &Modifiers) -> bool {
        modifiers.visibility >= self.member_visibility
    }

    /// 没有任何可见性过滤时为 true
    pub(crate) fn filters_nothing(&self) -> bool {
        self.class_visibility == Visibility::Private && self.member_visibility == Visibility::Private
    }
}
