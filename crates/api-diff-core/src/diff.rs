//! 差异树模块
//!
//! 比较两个接口面模型的输出：API → 包 → 类型 → 成员 的层级结构。

use crate::model::{Constructor, Field, Method, Package, TypeDecl};
use serde::{Deserialize, Serialize};

/// 成员种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    Method,
    Field,
}

/// 两个版本中同一成员之间的变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDiff {
    pub kind: MemberKind,
    /// 成员名称，构造函数为所属类型的名称
    pub name: String,
    /// 旧类型：方法为返回类型，字段为字段类型，构造函数为签名
    pub old_type: Option<String>,
    pub new_type: Option<String>,
    /// 旧参数签名，仅方法有
    pub old_signature: Option<String>,
    pub new_signature: Option<String>,
    /// 旧异常列表，仅方法与构造函数有
    pub old_exceptions: Option<String>,
    pub new_exceptions: Option<String>,
    /// 修饰符变化的描述
    pub modifiers_change: Option<String>,
    /// 继承来源变化的描述
    pub inheritance_change: Option<String>,
    /// 继承来源变化时，新版本中定义该成员的祖先
    pub inherited_from: Option<String>,
    pub documentation_change: Option<String>,
}

impl MemberDiff {
    pub fn new(kind: MemberKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            old_type: None,
            new_type: None,
            old_signature: None,
            new_signature: None,
            old_exceptions: None,
            new_exceptions: None,
            modifiers_change: None,
            inheritance_change: None,
            inherited_from: None,
            documentation_change: None,
        }
    }

    pub fn type_changed(&self) -> bool {
        self.old_type != self.new_type
    }

    pub fn exceptions_changed(&self) -> bool {
        self.old_exceptions != self.new_exceptions
    }

    /// 除文档有无之外是否还有变化，只有这类变化计入变化幅度
    pub fn is_structural(&self) -> bool {
        self.type_changed()
            || self.old_signature != self.new_signature
            || self.exceptions_changed()
            || self.modifiers_change.is_some()
            || self.inheritance_change.is_some()
    }
}

/// 两个版本中同一类型之间的变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDiff {
    pub name: String,
    /// 新版本中是否为接口
    pub is_interface: bool,
    pub inheritance_change: Option<String>,
    /// 类与接口互换、abstract 以及通用修饰符的变化
    pub modifiers_change: Option<String>,
    pub documentation_change: Option<String>,

    pub constructors_added: Vec<Constructor>,
    pub constructors_removed: Vec<Constructor>,
    pub constructors_changed: Vec<MemberDiff>,

    pub methods_added: Vec<Method>,
    pub methods_removed: Vec<Method>,
    pub methods_changed: Vec<MemberDiff>,

    pub fields_added: Vec<Field>,
    pub fields_removed: Vec<Field>,
    pub fields_changed: Vec<MemberDiff>,

    /// 参与比较的旧版本成员数
    pub old_member_count: usize,
    pub new_member_count: usize,
    /// 变化幅度，0 到 100
    pub magnitude: f64,
}

impl ClassDiff {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            inheritance_change: None,
            modifiers_change: None,
            documentation_change: None,
            constructors_added: Vec::new(),
            constructors_removed: Vec::new(),
            constructors_changed: Vec::new(),
            methods_added: Vec::new(),
            methods_removed: Vec::new(),
            methods_changed: Vec::new(),
            fields_added: Vec::new(),
            fields_removed: Vec::new(),
            fields_changed: Vec::new(),
            old_member_count: 0,
            new_member_count: 0,
            magnitude: 0.0,
        }
    }

    pub fn added_count(&self) -> usize {
        self.constructors_added.len() + self.methods_added.len() + self.fields_added.len()
    }

    pub fn removed_count(&self) -> usize {
        self.constructors_removed.len() + self.methods_removed.len() + self.fields_removed.len()
    }

    pub fn changed_count(&self) -> usize {
        self.constructors_changed.len() + self.methods_changed.len() + self.fields_changed.len()
    }

    /// 有结构性变化的成员数，不含只有文档变化的成员
    pub fn structural_changed_count(&self) -> usize {
        self.constructors_changed
            .iter()
            .chain(&self.methods_changed)
            .chain(&self.fields_changed)
            .filter(|m| m.is_structural())
            .count()
    }

    /// 类型本身（而非成员）是否有变化
    pub fn has_class_level_change(&self) -> bool {
        self.modifiers_change.is_some() || self.inheritance_change.is_some()
    }

    pub fn has_changes(&self) -> bool {
        self.added_count() + self.removed_count() + self.changed_count() > 0
            || self.has_class_level_change()
            || self.documentation_change.is_some()
    }
}

/// 两个版本中同一包之间的变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDiff {
    pub name: String,
    pub types_added: Vec<TypeDecl>,
    pub types_removed: Vec<TypeDecl>,
    pub types_changed: Vec<ClassDiff>,
    pub documentation_change: Option<String>,
    /// 旧版本包的权重，见 [`crate::magnitude::package_weight`]
    pub old_weight: usize,
    pub new_weight: usize,
    pub magnitude: f64,
}

impl PackageDiff {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types_added: Vec::new(),
            types_removed: Vec::new(),
            types_changed: Vec::new(),
            documentation_change: None,
            old_weight: 0,
            new_weight: 0,
            magnitude: 0.0,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.types_added.is_empty()
            || !self.types_removed.is_empty()
            || !self.types_changed.is_empty()
            || self.documentation_change.is_some()
    }
}

/// 两个 API 之间的全部变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDiff {
    pub old_api_name: String,
    pub new_api_name: String,
    pub packages_added: Vec<Package>,
    pub packages_removed: Vec<Package>,
    pub packages_changed: Vec<PackageDiff>,
    pub old_weight: usize,
    pub new_weight: usize,
    /// 整体变化幅度，0 到 100
    pub magnitude: f64,
}

/// 各层级增删改的计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStatistics {
    pub packages_added: usize,
    pub packages_removed: usize,
    pub packages_changed: usize,
    pub types_added: usize,
    pub types_removed: usize,
    pub types_changed: usize,
    pub members_added: usize,
    pub members_removed: usize,
    pub members_changed: usize,
}

impl ApiDiff {
    pub fn new(old_api_name: impl Into<String>, new_api_name: impl Into<String>) -> Self {
        Self {
            old_api_name: old_api_name.into(),
            new_api_name: new_api_name.into(),
            packages_added: Vec::new(),
            packages_removed: Vec::new(),
            packages_changed: Vec::new(),
            old_weight: 0,
            new_weight: 0,
            magnitude: 0.0,
        }
    }

    /// 两个 API 完全相同时为 true
    pub fn is_empty(&self) -> bool {
        self.packages_added.is_empty()
            && self.packages_removed.is_empty()
            && self.packages_changed.is_empty()
    }

    pub fn statistics(&self) -> DiffStatistics {
        let mut stats = DiffStatistics {
            packages_added: self.packages_added.len(),
            packages_removed: self.packages_removed.len(),
            packages_changed: self.packages_changed.len(),
            ..DiffStatistics::default()
        };
        for package in &self.packages_changed {
            stats.types_added += package.types_added.len();
            stats.types_removed += package.types_removed.len();
            stats.types_changed += package.types_changed.len();
            for class in &package.types_changed {
                stats.members_added += class.added_count();
                stats.members_removed += class.removed_count();
                stats.members_changed += class.changed_count();
            }
        }
        stats
    }

    pub fn find_package(&self, name: &str) -> Option<&PackageDiff> {
        self.packages_changed.iter().find(|p| p.name == name)
    }

    /// 按包名与类型简单名查找类型差异
    pub fn find_class(&self, package: &str, name: &str) -> Option<&ClassDiff> {
        self.find_package(package)
            .and_then(|p| p.types_changed.iter().find(|c| c.name == name))
    }
}
