//! 元素匹配与差异比较模块
//!
//! 在包、类型、成员各层级按标识键匹配新旧两个接口面模型：
//! 只在旧版本中的元素为删除，只在新版本中的为新增，两边都有的逐字段比较。
//! 类型改名不做识别，总是报告为一次删除加一次新增。

use crate::diff::{ApiDiff, ClassDiff, MemberDiff, MemberKind, PackageDiff};
use crate::error::Result;
use crate::magnitude::{MagnitudeCalculator, package_weight};
use crate::model::{
    Constructor, Field, Method, Package, Parameter, Surface, TypeDecl, flag_change,
    has_documentation,
};
use crate::options::DiffOptions;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 按标识键匹配的结果，各列表按键排序
struct Matched<'a, T> {
    removed: Vec<&'a T>,
    added: Vec<&'a T>,
    common: Vec<(&'a T, &'a T)>,
}

fn match_by_key<'a, T, K, F>(old: &'a [T], new: &'a [T], key: F) -> Matched<'a, T>
where
    K: Ord,
    F: Fn(&'a T) -> K,
{
    let old_by_key: BTreeMap<K, &'a T> = old.iter().map(|item| (key(item), item)).collect();
    let new_by_key: BTreeMap<K, &'a T> = new.iter().map(|item| (key(item), item)).collect();

    let mut matched = Matched {
        removed: Vec::new(),
        added: Vec::new(),
        common: Vec::new(),
    };
    for (k, old_item) in &old_by_key {
        match new_by_key.get(k) {
            Some(new_item) => matched.common.push((*old_item, *new_item)),
            None => matched.removed.push(*old_item),
        }
    }
    for (k, new_item) in &new_by_key {
        if !old_by_key.contains_key(k) {
            matched.added.push(*new_item);
        }
    }
    matched
}

fn join_notes(notes: Vec<String>) -> Option<String> {
    if notes.is_empty() {
        None
    } else {
        Some(notes.join(" "))
    }
}

/// 成员继承来源的变化
fn member_inheritance_change(old: Option<&str>, new: Option<&str>) -> Option<String> {
    match (old, new) {
        (None, Some(to)) => Some(format!(
            "Now inherited from {to}; previously defined locally."
        )),
        (Some(from), None) => Some(format!(
            "Now defined locally; previously inherited from {from}."
        )),
        (Some(from), Some(to)) if from != to => Some(format!(
            "Now inherited from {to}; previously inherited from {from}."
        )),
        _ => None,
    }
}

/// 类型继承关系的变化：父类以及实现接口的集合差
fn class_inheritance_change(old: &TypeDecl, new: &TypeDecl) -> Option<String> {
    let mut notes = Vec::new();
    match (old.extends.as_deref(), new.extends.as_deref()) {
        (Some(from), Some(to)) if from != to => {
            notes.push(format!("The superclass changed from {from} to {to}."))
        }
        (None, Some(to)) => notes.push(format!("Now extends {to}.")),
        (Some(from), None) => notes.push(format!("No longer extends {from}.")),
        _ => {}
    }

    let sorted = |names: &[String]| {
        let mut names: Vec<String> = names.to_vec();
        names.sort();
        names.dedup();
        names
    };
    let old_interfaces = sorted(&old.implements);
    let new_interfaces = sorted(&new.implements);

    let removed: Vec<&str> = old_interfaces
        .iter()
        .filter(|i| new_interfaces.binary_search(i).is_err())
        .map(String::as_str)
        .collect();
    let added: Vec<&str> = new_interfaces
        .iter()
        .filter(|i| old_interfaces.binary_search(i).is_err())
        .map(String::as_str)
        .collect();

    let label = |count: usize| if count == 1 { "interface" } else { "interfaces" };
    if !removed.is_empty() {
        notes.push(format!(
            "Removed {} {}.",
            label(removed.len()),
            removed.join(", ")
        ));
    }
    if !added.is_empty() {
        notes.push(format!("Added {} {}.", label(added.len()), added.join(", ")));
    }
    join_notes(notes)
}

/// 参数名的变化，签名相同时参数类型必然一致
fn parameter_name_change(old: &[Parameter], new: &[Parameter]) -> Option<String> {
    let differs = old.len() != new.len()
        || old
            .iter()
            .zip(new)
            .any(|(a, b)| a.full_cmp(b) != Ordering::Equal);
    if !differs {
        return None;
    }
    let names = |params: &[Parameter]| {
        params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    Some(format!(
        "Change in parameter names from ({}) to ({}).",
        names(old),
        names(new)
    ))
}

/// API 比较器
///
/// 比较两个已完成继承解析的模型。比较是输入的纯函数，
/// 同一比较器可以在多个线程中同时使用。
#[derive(Debug, Clone, Default)]
pub struct ApiComparator {
    options: DiffOptions,
    calculator: MagnitudeCalculator,
}

impl ApiComparator {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            calculator: MagnitudeCalculator::new(),
        }
    }

    pub fn with_default_options() -> Self {
        Self::new(DiffOptions::default())
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// 比较旧模型与新模型，生成带分数的差异树
    pub fn compare(&self, old: &Surface, new: &Surface) -> Result<ApiDiff> {
        old.validate()?;
        new.validate()?;

        info!(
            "Comparing API '{}' ({} types) with '{}' ({} types)",
            old.name,
            old.type_count(),
            new.name,
            new.type_count()
        );

        let old_views: Vec<Cow<'_, Package>> = old
            .packages()
            .iter()
            .map(|p| self.visible_package(p))
            .collect();
        let new_views: Vec<Cow<'_, Package>> = new
            .packages()
            .iter()
            .map(|p| self.visible_package(p))
            .collect();

        let mut api_diff = ApiDiff::new(&old.name, &new.name);
        api_diff.old_weight = old_views.iter().map(|p| package_weight(p)).sum();
        api_diff.new_weight = new_views.iter().map(|p| package_weight(p)).sum();

        let packages = match_by_key(&old_views, &new_views, |p| p.name.as_str());
        for package in packages.removed {
            debug!("Package {} removed", package.name);
            api_diff.packages_removed.push(Package::clone(package));
        }
        for (old_package, new_package) in packages.common {
            if let Some(package_diff) = self.compare_packages(old_package, new_package) {
                api_diff.packages_changed.push(package_diff);
            }
        }
        for package in packages.added {
            debug!("Package {} added", package.name);
            api_diff.packages_added.push(Package::clone(package));
        }

        self.calculator.annotate(&mut api_diff);

        let stats = api_diff.statistics();
        info!(
            "Comparison finished: packages +{} -{} ~{}, types +{} -{} ~{}, members +{} -{} ~{}, magnitude {:.2}",
            stats.packages_added,
            stats.packages_removed,
            stats.packages_changed,
            stats.types_added,
            stats.types_removed,
            stats.types_changed,
            stats.members_added,
            stats.members_removed,
            stats.members_changed,
            api_diff.magnitude
        );
        Ok(api_diff)
    }

    fn compare_packages(&self, old: &Package, new: &Package) -> Option<PackageDiff> {
        let mut diff = PackageDiff::new(&new.name);
        diff.old_weight = package_weight(old);
        diff.new_weight = package_weight(new);

        let types = match_by_key(&old.types, &new.types, |t| t.name.as_str());
        diff.types_removed = types.removed.into_iter().cloned().collect();
        diff.types_added = types.added.into_iter().cloned().collect();
        for (old_type, new_type) in types.common {
            if let Some(class_diff) = self.compare_types(old_type, new_type) {
                diff.types_changed.push(class_diff);
            }
        }
        diff.documentation_change =
            self.documentation_change(old.doc.as_deref(), new.doc.as_deref());

        if diff.has_changes() {
            debug!(
                "Package {} changed: +{} -{} ~{} types",
                diff.name,
                diff.types_added.len(),
                diff.types_removed.len(),
                diff.types_changed.len()
            );
            Some(diff)
        } else {
            None
        }
    }

    fn compare_types(&self, old: &TypeDecl, new: &TypeDecl) -> Option<ClassDiff> {
        let mut diff = ClassDiff::new(&new.name);
        diff.is_interface = new.is_interface;
        diff.old_member_count = old.member_count();
        diff.new_member_count = new.member_count();

        let mut notes = Vec::new();
        if old.is_interface != new.is_interface {
            notes.push(if new.is_interface {
                "Changed from class to interface.".to_string()
            } else {
                "Changed from interface to class.".to_string()
            });
        }
        notes.extend(flag_change("abstract", old.is_abstract, new.is_abstract));
        notes.extend(
            old.modifiers
                .changes(&new.modifiers, self.include_deprecation()),
        );
        diff.modifiers_change = join_notes(notes);
        diff.inheritance_change = class_inheritance_change(old, new);
        diff.documentation_change =
            self.documentation_change(old.doc.as_deref(), new.doc.as_deref());

        let constructors = match_by_key(&old.constructors, &new.constructors, Constructor::key);
        diff.constructors_removed = constructors.removed.into_iter().cloned().collect();
        diff.constructors_added = constructors.added.into_iter().cloned().collect();
        for (old_ctor, new_ctor) in constructors.common {
            if let Some(member) = self.compare_constructors(old_ctor, new_ctor, &new.name) {
                diff.constructors_changed.push(member);
            }
        }

        let methods = match_by_key(&old.methods, &new.methods, Method::key);
        diff.methods_removed = methods.removed.into_iter().cloned().collect();
        diff.methods_added = methods.added.into_iter().cloned().collect();
        for (old_method, new_method) in methods.common {
            if let Some(member) = self.compare_methods(old_method, new_method) {
                diff.methods_changed.push(member);
            }
        }

        let fields = match_by_key(&old.fields, &new.fields, Field::key);
        diff.fields_removed = fields.removed.into_iter().cloned().collect();
        diff.fields_added = fields.added.into_iter().cloned().collect();
        for (old_field, new_field) in fields.common {
            if let Some(member) = self.compare_fields(old_field, new_field) {
                diff.fields_changed.push(member);
            }
        }

        diff.has_changes().then_some(diff)
    }

    fn compare_constructors(
        &self,
        old: &Constructor,
        new: &Constructor,
        class_name: &str,
    ) -> Option<MemberDiff> {
        let mut diff = MemberDiff::new(MemberKind::Constructor, class_name);
        diff.old_type = Some(old.signature.clone());
        diff.new_type = Some(new.signature.clone());
        diff.old_exceptions = Some(old.exceptions.clone());
        diff.new_exceptions = Some(new.exceptions.clone());
        let mut changed = diff.exceptions_changed();

        let notes = old
            .modifiers
            .changes(&new.modifiers, self.include_deprecation());
        if let Some(text) = join_notes(notes) {
            diff.modifiers_change = Some(text);
            changed = true;
        }
        if let Some(text) = self.documentation_change(old.doc.as_deref(), new.doc.as_deref()) {
            diff.documentation_change = Some(text);
            changed = true;
        }

        changed.then_some(diff)
    }

    fn compare_methods(&self, old: &Method, new: &Method) -> Option<MemberDiff> {
        let mut diff = MemberDiff::new(MemberKind::Method, &new.name);
        diff.old_type = Some(old.return_type.clone());
        diff.new_type = Some(new.return_type.clone());
        diff.old_signature = Some(old.signature());
        diff.new_signature = Some(new.signature());
        diff.old_exceptions = Some(old.exceptions.clone());
        diff.new_exceptions = Some(new.exceptions.clone());
        let mut changed = diff.type_changed() || diff.exceptions_changed();

        if let Some(text) = member_inheritance_change(
            old.inherited_from.as_deref(),
            new.inherited_from.as_deref(),
        ) {
            diff.inheritance_change = Some(text);
            diff.inherited_from = new.inherited_from.clone();
            changed = true;
        }

        let mut notes = Vec::new();
        notes.extend(flag_change("abstract", old.is_abstract, new.is_abstract));
        if self.options.show_all_changes {
            notes.extend(flag_change("native", old.is_native, new.is_native));
            notes.extend(flag_change(
                "synchronized",
                old.is_synchronized,
                new.is_synchronized,
            ));
            notes.extend(parameter_name_change(&old.params, &new.params));
        }
        notes.extend(
            old.modifiers
                .changes(&new.modifiers, self.include_deprecation()),
        );
        if let Some(text) = join_notes(notes) {
            diff.modifiers_change = Some(text);
            changed = true;
        }
        if let Some(text) = self.documentation_change(old.doc.as_deref(), new.doc.as_deref()) {
            diff.documentation_change = Some(text);
            changed = true;
        }

        changed.then_some(diff)
    }

    fn compare_fields(&self, old: &Field, new: &Field) -> Option<MemberDiff> {
        let mut diff = MemberDiff::new(MemberKind::Field, &new.name);
        diff.old_type = Some(old.type_name.clone());
        diff.new_type = Some(new.type_name.clone());
        let mut changed = diff.type_changed();

        if let Some(text) = member_inheritance_change(
            old.inherited_from.as_deref(),
            new.inherited_from.as_deref(),
        ) {
            diff.inheritance_change = Some(text);
            diff.inherited_from = new.inherited_from.clone();
            changed = true;
        }

        let mut notes = Vec::new();
        notes.extend(flag_change("transient", old.is_transient, new.is_transient));
        notes.extend(flag_change("volatile", old.is_volatile, new.is_volatile));
        if let (Some(old_value), Some(new_value)) = (&old.value, &new.value) {
            if old_value != new_value {
                notes.push(format!("Change in value from {old_value} to {new_value}."));
            }
        }
        notes.extend(
            old.modifiers
                .changes(&new.modifiers, self.include_deprecation()),
        );
        if let Some(text) = join_notes(notes) {
            diff.modifiers_change = Some(text);
            changed = true;
        }
        if let Some(text) = self.documentation_change(old.doc.as_deref(), new.doc.as_deref()) {
            diff.documentation_change = Some(text);
            changed = true;
        }

        changed.then_some(diff)
    }

    /// 文档有无的变化，只在启用文档比较时报告，不比较文档内容
    fn documentation_change(&self, old: Option<&str>, new: Option<&str>) -> Option<String> {
        if !self.options.include_documentation_diffs {
            return None;
        }
        match (has_documentation(old), has_documentation(new)) {
            (false, true) => Some("Documentation added.".to_string()),
            (true, false) => Some("Documentation removed.".to_string()),
            _ => None,
        }
    }

    fn include_deprecation(&self) -> bool {
        !self.options.incompatible_changes_only
    }

    /// 按可见性阈值过滤后的包视图，无过滤时直接借用
    fn visible_package<'a>(&self, package: &'a Package) -> Cow<'a, Package> {
        if self.options.filters_nothing() {
            return Cow::Borrowed(package);
        }
        let types = package
            .types
            .iter()
            .filter(|t| self.options.includes_type(t))
            .map(|t| self.visible_type(t))
            .collect();
        Cow::Owned(Package {
            name: package.name.clone(),
            types,
            doc: package.doc.clone(),
        })
    }

    fn visible_type(&self, decl: &TypeDecl) -> TypeDecl {
        let mut copy = decl.clone();
        copy.constructors
            .retain(|c| self.options.includes_member(&c.modifiers));
        copy.methods
            .retain(|m| self.options.includes_member(&m.modifiers));
        copy.fields
            .retain(|f| self.options.includes_member(&f.modifiers));
        copy
    }
}

/// 使用给定选项比较两个已解析的模型
pub fn compare(old: &Surface, new: &Surface, options: &DiffOptions) -> Result<ApiDiff> {
    ApiComparator::new(options.clone()).compare(old, new)
}
