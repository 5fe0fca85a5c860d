//! 继承解析模块
//!
//! 将祖先类型中可见且未被覆盖的方法与字段复制到子类型中，
//! 并用 `inherited_from` 记录最初定义它们的祖先。

use crate::error::{ApiDiffError, Result};
use crate::model::{Field, Method, MethodKey, Surface, TypeDecl, TypeLocation, Visibility};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// 继承解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct InheritanceResolver;

/// 一次解析的统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// 获得了继承成员的类型数量
    pub types_extended: usize,
    pub methods_inherited: usize,
    pub fields_inherited: usize,
}

/// 单个类型待追加的继承成员
struct InheritancePlan {
    method_keys: HashSet<MethodKey>,
    field_names: HashSet<String>,
    methods: Vec<Method>,
    fields: Vec<Field>,
}

impl InheritancePlan {
    fn for_type(decl: &TypeDecl) -> Self {
        Self {
            method_keys: decl.methods.iter().map(Method::key).collect(),
            field_names: decl.fields.iter().map(|f| f.name.clone()).collect(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// 吸收祖先自身定义的非私有成员，已存在或已继承的成员跳过
    fn absorb(&mut self, ancestor: &TypeDecl, ancestor_name: &str) {
        for method in &ancestor.methods {
            if method.is_inherited() || method.modifiers.visibility == Visibility::Private {
                continue;
            }
            if self.method_keys.insert(method.key()) {
                let mut copy = method.clone();
                copy.inherited_from = Some(ancestor_name.to_string());
                self.methods.push(copy);
            }
        }

        for field in &ancestor.fields {
            if field.is_inherited() || field.modifiers.visibility == Visibility::Private {
                continue;
            }
            if self.field_names.insert(field.name.clone()) {
                let mut copy = field.clone();
                copy.inherited_from = Some(ancestor_name.to_string());
                self.fields.push(copy);
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.fields.is_empty()
    }
}

impl InheritanceResolver {
    pub fn new() -> Self {
        Self
    }

    /// 为模型中的每个类型追加继承成员
    ///
    /// 祖先名不在模型中时视为外部类型，该分支到此为止。继承关系成环时返回
    /// [`ApiDiffError::CyclicInheritance`]，此时模型不会被修改。
    /// 重复解析同一模型不会产生重复的继承副本。
    pub fn resolve(&self, surface: &mut Surface) -> Result<ResolutionStats> {
        surface.validate()?;

        let mut plans: Vec<(TypeLocation, InheritancePlan)> = Vec::new();
        for package in surface.packages() {
            for decl in &package.types {
                let qualified = package.qualified_name(&decl.name);
                let mut plan = InheritancePlan::for_type(decl);
                let mut path = vec![qualified.clone()];
                let mut walked = HashSet::new();
                for ancestor in decl.ancestor_names() {
                    self.walk(surface, &qualified, ancestor, &mut path, &mut walked, &mut plan)?;
                }
                if !plan.is_empty() {
                    if let Some(location) = surface.locate(&qualified) {
                        plans.push((location, plan));
                    }
                }
            }
        }

        let mut stats = ResolutionStats::default();
        for (location, plan) in plans {
            if let Some(decl) = surface.type_mut(location) {
                debug!(
                    "Type {} inherits {} methods and {} fields",
                    decl.name,
                    plan.methods.len(),
                    plan.fields.len()
                );
                stats.types_extended += 1;
                stats.methods_inherited += plan.methods.len();
                stats.fields_inherited += plan.fields.len();
                decl.methods.extend(plan.methods);
                decl.fields.extend(plan.fields);
            }
        }

        info!(
            "Resolved inheritance for surface '{}': {} types extended, {} methods and {} fields inherited",
            surface.name, stats.types_extended, stats.methods_inherited, stats.fields_inherited
        );
        Ok(stats)
    }

    fn walk(
        &self,
        surface: &Surface,
        origin: &str,
        ancestor_name: &str,
        path: &mut Vec<String>,
        walked: &mut HashSet<String>,
        plan: &mut InheritancePlan,
    ) -> Result<()> {
        if path.iter().any(|p| p == ancestor_name) {
            let chain = path
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(ancestor_name))
                .collect::<Vec<_>>()
                .join(" -> ");
            warn!("Cyclic inheritance in surface '{}': {}", surface.name, chain);
            return Err(ApiDiffError::CyclicInheritance {
                type_name: origin.to_string(),
                chain,
            });
        }

        let Some(ancestor) = surface.type_by_name(ancestor_name) else {
            debug!("Ancestor {} of {} is external, stopping", ancestor_name, origin);
            return Ok(());
        };

        // 菱形继承中已走过的祖先不必再走一遍
        if !walked.insert(ancestor_name.to_string()) {
            return Ok(());
        }

        plan.absorb(ancestor, ancestor_name);

        path.push(ancestor_name.to_string());
        for next in ancestor.ancestor_names() {
            self.walk(surface, origin, next, path, walked, plan)?;
        }
        path.pop();
        Ok(())
    }
}

/// 使用默认解析器解析模型
pub fn resolve(surface: &mut Surface) -> Result<ResolutionStats> {
    InheritanceResolver::new().resolve(surface)
}
