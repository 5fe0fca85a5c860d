//! 接口面模型模块
//!
//! 描述某一版本 API 的包、类型、成员与修饰符。模型由外部的模型构建器生成，
//! 核心库只在继承解析时向类型追加继承成员的副本。

use crate::error::{ApiDiffError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// 方法或构造函数不抛出异常时使用的异常列表
pub const NO_EXCEPTIONS: &str = "no exceptions";

/// 模型构建器为缺少文档的元素填入的占位文本
pub const DOC_PLACEHOLDER: &str = "InsertCommentsHere";

/// 判断文档文本是否有实际内容
///
/// `None`、空白文本以及 [`DOC_PLACEHOLDER`] 都视为没有文档。
pub fn has_documentation(doc: Option<&str>) -> bool {
    match doc {
        Some(text) => {
            let text = text.trim();
            !text.is_empty() && text != DOC_PLACEHOLDER
        }
        None => false,
    }
}

/// 将异常类型列表拼接为规范的逗号分隔字符串
pub fn join_exceptions(exception_types: &[&str]) -> String {
    if exception_types.is_empty() {
        NO_EXCEPTIONS.to_string()
    } else {
        exception_types.join(", ")
    }
}

/// 可见性级别，可见范围越大排序越靠后
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Package,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Package => "package",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ApiDiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "private" => Ok(Visibility::Private),
            "package" => Ok(Visibility::Package),
            "protected" => Ok(Visibility::Protected),
            "public" => Ok(Visibility::Public),
            other => Err(ApiDiffError::ConfigError(format!(
                "Unknown visibility level: {other} (expected public, protected, package or private)"
            ))),
        }
    }
}

/// 程序元素的通用修饰符
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
    pub is_deprecated: bool,
    pub visibility: Visibility,
}

impl Modifiers {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_deprecated(mut self, is_deprecated: bool) -> Self {
        self.is_deprecated = is_deprecated;
        self
    }

    /// 描述从当前（旧）修饰符到新修饰符的变化
    ///
    /// 每条描述以句号结尾；`include_deprecation` 为 false 时忽略废弃标记的变化。
    pub fn changes(&self, new: &Modifiers, include_deprecation: bool) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(text) = flag_change("static", self.is_static, new.is_static) {
            changes.push(text);
        }
        if let Some(text) = flag_change("final", self.is_final, new.is_final) {
            changes.push(text);
        }
        if include_deprecation && self.is_deprecated != new.is_deprecated {
            if self.is_deprecated {
                changes.push("Change from deprecated to undeprecated.".to_string());
            } else {
                changes.push("Now deprecated.".to_string());
            }
        }
        if self.visibility != new.visibility {
            changes.push(format!(
                "Change of visibility from {} to {}.",
                self.visibility, new.visibility
            ));
        }
        changes
    }
}

/// 描述一个布尔标记的变化，例如 "Change from final to non-final."
pub(crate) fn flag_change(word: &str, old: bool, new: bool) -> Option<String> {
    match (old, new) {
        (true, false) => Some(format!("Change from {word} to non-{word}.")),
        (false, true) => Some(format!("Change from non-{word} to {word}.")),
        _ => None,
    }
}

/// 方法参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// 匹配用的键，仅包含参数名
    pub fn key(&self) -> &str {
        &self.name
    }

    /// 参数在签名中的片段，`void` 类型贡献空字符串
    pub fn signature_fragment(&self) -> &str {
        if self.type_name == "void" {
            ""
        } else {
            &self.type_name
        }
    }

    /// 同时比较名称与类型的完整比较
    pub fn full_cmp(&self, other: &Parameter) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.type_name.cmp(&other.type_name))
    }
}

/// 方法的标识键：名称加参数类型签名
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodKey {
    pub name: String,
    pub signature: String,
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.signature)
    }
}

fn default_exceptions() -> String {
    NO_EXCEPTIONS.to_string()
}

/// 方法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// 逗号分隔的异常类型列表，无异常时为 [`NO_EXCEPTIONS`]
    #[serde(default = "default_exceptions")]
    pub exceptions: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub is_synchronized: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub doc: Option<String>,
    /// 最初定义该方法的祖先类型的全限定名，`None` 表示在本类型中定义
    pub inherited_from: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
            exceptions: NO_EXCEPTIONS.to_string(),
            is_abstract: false,
            is_native: false,
            is_synchronized: false,
            modifiers: Modifiers::default(),
            doc: None,
            inherited_from: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(Parameter::new(name, type_name));
        self
    }

    pub fn with_exceptions(mut self, exception_types: &[&str]) -> Self {
        self.exceptions = join_exceptions(exception_types);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_native(mut self, is_native: bool) -> Self {
        self.is_native = is_native;
        self
    }

    pub fn with_synchronized(mut self, is_synchronized: bool) -> Self {
        self.is_synchronized = is_synchronized;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// 参数类型签名，例如 "int, java.lang.String"
    pub fn signature(&self) -> String {
        self.params
            .iter()
            .map(Parameter::signature_fragment)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn key(&self) -> MethodKey {
        MethodKey {
            name: self.name.clone(),
            signature: self.signature(),
        }
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

/// 字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_transient: bool,
    #[serde(default)]
    pub is_volatile: bool,
    /// 常量字段的字面值
    pub value: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub doc: Option<String>,
    pub inherited_from: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_transient: false,
            is_volatile: false,
            value: None,
            modifiers: Modifiers::default(),
            doc: None,
            inherited_from: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    pub fn with_transient(mut self, is_transient: bool) -> Self {
        self.is_transient = is_transient;
        self
    }

    pub fn with_volatile(mut self, is_volatile: bool) -> Self {
        self.is_volatile = is_volatile;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// 字段不能重载，名称即标识
    pub fn key(&self) -> &str {
        &self.name
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

/// 构造函数
///
/// 构造函数没有独立的名称，以参数类型拼接成的签名作为标识键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub signature: String,
    #[serde(default = "default_exceptions")]
    pub exceptions: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub doc: Option<String>,
}

impl Constructor {
    /// 由参数类型列表创建构造函数
    pub fn new(param_types: &[&str]) -> Self {
        let signature = param_types
            .iter()
            .map(|t| if *t == "void" { "" } else { *t })
            .collect::<Vec<_>>()
            .join(", ");
        Self::with_signature(signature)
    }

    /// 直接使用已拼接好的签名创建构造函数
    pub fn with_signature(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            exceptions: NO_EXCEPTIONS.to_string(),
            modifiers: Modifiers::default(),
            doc: None,
        }
    }

    pub fn with_exceptions(mut self, exception_types: &[&str]) -> Self {
        self.exceptions = join_exceptions(exception_types);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.signature
    }
}

/// 类或接口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// 简单名称，不含包名
    pub name: String,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// 父类型的全限定名
    pub extends: Option<String>,
    /// 实现的接口的全限定名
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub doc: Option<String>,
}

impl TypeDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            is_abstract: false,
            modifiers: Modifiers::default(),
            extends: None,
            implements: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            doc: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            is_abstract: true,
            ..Self::class(name)
        }
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.modifiers.visibility = visibility;
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// 构造函数、方法与字段的总数
    pub fn member_count(&self) -> usize {
        self.constructors.len() + self.methods.len() + self.fields.len()
    }

    /// 父类型与实现接口的名称，父类型在前
    pub fn ancestor_names(&self) -> impl Iterator<Item = &str> {
        self.extends
            .iter()
            .chain(self.implements.iter())
            .map(String::as_str)
    }
}

/// 包
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    pub doc: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            doc: None,
        }
    }

    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// 包内类型的全限定名
    pub fn qualified_name(&self, type_name: &str) -> String {
        if self.name.is_empty() {
            type_name.to_string()
        } else {
            format!("{}.{}", self.name, type_name)
        }
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeLocation {
    pub package: usize,
    pub index: usize,
}

/// 接口面模型的根
///
/// 按插入顺序持有各个包，并维护全限定类型名到类型位置的索引，
/// 用于继承解析时查找父类型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceRepr")]
pub struct Surface {
    /// API 名称，例如 "SuperProduct 1.3"
    pub name: String,
    packages: Vec<Package>,
    #[serde(skip)]
    index: HashMap<String, TypeLocation>,
}

/// 反序列化时的中间表示，转换时重建类型索引
#[derive(Deserialize)]
struct SurfaceRepr {
    name: String,
    #[serde(default)]
    packages: Vec<Package>,
}

impl TryFrom<SurfaceRepr> for Surface {
    type Error = ApiDiffError;

    fn try_from(repr: SurfaceRepr) -> Result<Self> {
        let mut surface = Surface::new(repr.name);
        for package in repr.packages {
            surface.add_package(package)?;
        }
        Ok(surface)
    }
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 添加包，包名或类型全限定名重复时失败
    pub fn add_package(&mut self, package: Package) -> Result<()> {
        if self.packages.iter().any(|p| p.name == package.name) {
            return Err(ApiDiffError::DuplicatePackage {
                surface: self.name.clone(),
                package: package.name,
            });
        }

        let package_index = self.packages.len();
        let mut entries = HashMap::with_capacity(package.types.len());
        for (index, decl) in package.types.iter().enumerate() {
            let qualified = package.qualified_name(&decl.name);
            if self.index.contains_key(&qualified) || entries.contains_key(&qualified) {
                return Err(ApiDiffError::DuplicateType {
                    surface: self.name.clone(),
                    package: package.name.clone(),
                    name: decl.name.clone(),
                });
            }
            entries.insert(
                qualified,
                TypeLocation {
                    package: package_index,
                    index,
                },
            );
        }

        self.index.extend(entries);
        self.packages.push(package);
        Ok(())
    }

    pub fn with_package(mut self, package: Package) -> Result<Self> {
        self.add_package(package)?;
        Ok(self)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// 按全限定名查找类型
    pub fn type_by_name(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.index
            .get(qualified_name)
            .map(|loc| &self.packages[loc.package].types[loc.index])
    }

    pub fn type_count(&self) -> usize {
        self.index.len()
    }

    pub fn member_count(&self) -> usize {
        self.packages
            .iter()
            .flat_map(|p| p.types.iter())
            .map(TypeDecl::member_count)
            .sum()
    }

    pub(crate) fn type_mut(&mut self, location: TypeLocation) -> Option<&mut TypeDecl> {
        self.packages
            .get_mut(location.package)
            .and_then(|p| p.types.get_mut(location.index))
    }

    pub(crate) fn locate(&self, qualified_name: &str) -> Option<TypeLocation> {
        self.index.get(qualified_name).copied()
    }

    /// 校验模型是否满足模型构建器的约定
    ///
    /// 检查必填字段以及类型内成员标识的唯一性，出错时返回能定位到具体元素的错误。
    pub fn validate(&self) -> Result<()> {
        for package in &self.packages {
            if package.name.trim().is_empty() {
                return Err(ApiDiffError::MissingField {
                    location: format!("surface '{}'", self.name),
                    field: "package.name",
                });
            }
            for decl in &package.types {
                self.validate_type(package, decl)?;
            }
        }
        Ok(())
    }

    fn validate_type(&self, package: &Package, decl: &TypeDecl) -> Result<()> {
        let package_location = format!("surface '{}', package '{}'", self.name, package.name);
        if decl.name.trim().is_empty() {
            return Err(ApiDiffError::MissingField {
                location: package_location,
                field: "type.name",
            });
        }

        let type_name = package.qualified_name(&decl.name);
        let location = format!("surface '{}', type '{}'", self.name, type_name);
        let missing = |member: &str, field: &'static str| ApiDiffError::MissingField {
            location: if member.is_empty() {
                location.clone()
            } else {
                format!("{location}, member '{member}'")
            },
            field,
        };
        let duplicate = |kind: &'static str, key: String| ApiDiffError::DuplicateMember {
            surface: self.name.clone(),
            type_name: type_name.clone(),
            kind,
            key,
        };

        if decl.extends.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(missing("", "extends"));
        }
        if decl.implements.iter().any(|i| i.trim().is_empty()) {
            return Err(missing("", "implements"));
        }

        let mut constructor_keys = HashSet::new();
        for constructor in &decl.constructors {
            if constructor.exceptions.is_empty() {
                return Err(missing(&constructor.signature, "constructor.exceptions"));
            }
            if !constructor_keys.insert(constructor.key()) {
                return Err(duplicate("constructor", constructor.signature.clone()));
            }
        }

        let mut method_keys = HashSet::new();
        for method in &decl.methods {
            if method.name.trim().is_empty() {
                return Err(missing("", "method.name"));
            }
            if method.return_type.trim().is_empty() {
                return Err(missing(&method.name, "method.return_type"));
            }
            if method.exceptions.is_empty() {
                return Err(missing(&method.name, "method.exceptions"));
            }
            if method.params.iter().any(|p| p.name.trim().is_empty()) {
                return Err(missing(&method.name, "parameter.name"));
            }
            if method.params.iter().any(|p| p.type_name.trim().is_empty()) {
                return Err(missing(&method.name, "parameter.type_name"));
            }
            let key = method.key();
            if method_keys.contains(&key) {
                return Err(duplicate("method", key.to_string()));
            }
            method_keys.insert(key);
        }

        let mut field_keys = HashSet::new();
        for field in &decl.fields {
            if field.name.trim().is_empty() {
                return Err(missing("", "field.name"));
            }
            if field.type_name.trim().is_empty() {
                return Err(missing(&field.name, "field.type_name"));
            }
            if !field_keys.insert(field.key()) {
                return Err(duplicate("field", field.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_package() -> Package {
        Package::new("com.acme").with_type(
            TypeDecl::class("Widget")
                .with_method(Method::new("resize", "void").with_param("w", "int"))
                .with_field(Field::new("SIZE", "int").with_value("3")),
        )
    }

    #[test]
    fn test_method_signature_skips_void_params() {
        let method = Method::new("run", "void")
            .with_param("a", "int")
            .with_param("b", "java.lang.String");
        assert_eq!(method.signature(), "int, java.lang.String");

        let odd = Method::new("run", "void").with_param("v", "void");
        assert_eq!(odd.signature(), "");
    }

    #[test]
    fn test_constructor_signature_joins_param_types() {
        let ctor = Constructor::new(&["int", "long"]);
        assert_eq!(ctor.signature, "int, long");
        assert_eq!(Constructor::new(&[]).signature, "");
    }

    #[test]
    fn test_exceptions_default_to_sentinel() {
        assert_eq!(Method::new("f", "void").exceptions, NO_EXCEPTIONS);
        let method = Method::new("f", "void").with_exceptions(&["IOException", "Oops"]);
        assert_eq!(method.exceptions, "IOException, Oops");
    }

    #[test]
    fn test_visibility_ordering_and_parsing() {
        assert!(Visibility::Public > Visibility::Protected);
        assert!(Visibility::Protected > Visibility::Package);
        assert!(Visibility::Package > Visibility::Private);
        assert_eq!("protected".parse::<Visibility>().unwrap(), Visibility::Protected);
        assert!("friendly".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_modifier_changes() {
        let old = Modifiers::new(Visibility::Public).with_final(true);
        let new = Modifiers::new(Visibility::Protected).with_deprecated(true);

        assert_eq!(
            old.changes(&new, true),
            vec![
                "Change from final to non-final.".to_string(),
                "Now deprecated.".to_string(),
                "Change of visibility from public to protected.".to_string(),
            ]
        );
        assert_eq!(old.changes(&new, false).len(), 2);
        assert!(old.changes(&old, true).is_empty());
    }

    #[test]
    fn test_has_documentation() {
        assert!(!has_documentation(None));
        assert!(!has_documentation(Some("   ")));
        assert!(!has_documentation(Some(DOC_PLACEHOLDER)));
        assert!(has_documentation(Some("Resizes the widget.")));
    }

    #[test]
    fn test_type_lookup_by_qualified_name() {
        let surface = Surface::new("v1").with_package(sample_package()).unwrap();
        assert_eq!(surface.type_count(), 1);
        assert_eq!(surface.member_count(), 2);
        assert!(surface.type_by_name("com.acme.Widget").is_some());
        assert!(surface.type_by_name("Widget").is_none());
    }

    #[test]
    fn test_duplicate_package_rejected() {
        let mut surface = Surface::new("v1");
        surface.add_package(sample_package()).unwrap();
        let err = surface.add_package(sample_package()).unwrap_err();
        assert!(matches!(err, ApiDiffError::DuplicatePackage { .. }));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let package = sample_package().with_type(TypeDecl::class("Widget"));
        let err = Surface::new("v1").with_package(package).unwrap_err();
        match err {
            ApiDiffError::DuplicateType { package, name, .. } => {
                assert_eq!(package, "com.acme");
                assert_eq!(name, "Widget");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_reports_member_location() {
        let package = Package::new("com.acme")
            .with_type(TypeDecl::class("Widget").with_field(Field::new("width", "")));
        let surface = Surface::new("v1").with_package(package).unwrap();
        let err = surface.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("com.acme.Widget"), "{message}");
        assert!(message.contains("width"), "{message}");
        assert!(message.contains("field.type_name"), "{message}");
    }

    #[test]
    fn test_validate_rejects_unnamed_parameter() {
        let package = Package::new("com.acme").with_type(
            TypeDecl::class("Widget").with_method(Method::new("resize", "void").with_param("", "int")),
        );
        let surface = Surface::new("v1").with_package(package).unwrap();
        let err = surface.validate().unwrap_err();
        assert!(matches!(err, ApiDiffError::MissingField { field: "parameter.name", .. }));
        assert!(err.to_string().contains("resize"));
    }

    #[test]
    fn test_validate_rejects_duplicate_methods() {
        let package = Package::new("p").with_type(
            TypeDecl::class("A")
                .with_method(Method::new("f", "void").with_param("x", "int"))
                .with_method(Method::new("f", "int").with_param("y", "int")),
        );
        let surface = Surface::new("v1").with_package(package).unwrap();
        assert!(matches!(
            surface.validate(),
            Err(ApiDiffError::DuplicateMember { kind: "method", .. })
        ));
    }

    #[test]
    fn test_overloads_are_distinct_keys() {
        let a = Method::new("f", "void").with_param("x", "int");
        let b = Method::new("f", "void").with_param("x", "long");
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key().to_string(), "f(int)");
    }

    #[test]
    fn test_parameter_full_comparison_uses_name_and_type() {
        let a = Parameter::new("x", "int");
        let b = Parameter::new("x", "long");
        assert_eq!(a.key(), b.key());
        assert_ne!(a.full_cmp(&b), Ordering::Equal);
    }
}
