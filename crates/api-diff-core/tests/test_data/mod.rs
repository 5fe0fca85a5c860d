//! 测试数据集模块
//!
//! 提供集成测试共用的接口面样例

#![allow(dead_code)]

use api_diff_core::{
    Constructor, Field, Method, Modifiers, Package, Surface, TypeDecl, Visibility,
};

/// 一个小型集合库的 1.0 版本
pub fn collections_v1() -> Surface {
    Surface::new("collections-1.0")
        .with_package(
            Package::new("org.example.collect")
                .with_doc("Collection types.")
                .with_type(
                    TypeDecl::interface("Container")
                        .with_method(Method::new("size", "int"))
                        .with_method(Method::new("isEmpty", "boolean")),
                )
                .with_type(
                    TypeDecl::class("AbstractList")
                        .with_abstract(true)
                        .implements("org.example.collect.Container")
                        .with_constructor(Constructor::new(&[]).with_visibility(Visibility::Protected))
                        .with_method(Method::new("size", "int"))
                        .with_method(Method::new("isEmpty", "boolean"))
                        .with_method(
                            Method::new("get", "Object")
                                .with_param("index", "int")
                                .with_abstract(true),
                        )
                        .with_field(
                            Field::new("modCount", "int").with_visibility(Visibility::Protected),
                        ),
                )
                .with_type(
                    TypeDecl::class("ArrayList")
                        .extends("org.example.collect.AbstractList")
                        .with_constructor(Constructor::new(&[]))
                        .with_constructor(Constructor::new(&["int"]))
                        .with_method(Method::new("get", "Object").with_param("index", "int"))
                        .with_method(Method::new("add", "boolean").with_param("e", "Object"))
                        .with_method(
                            Method::new("trimToSize", "void").with_visibility(Visibility::Package),
                        )
                        .with_field(
                            Field::new("elementData", "Object[]")
                                .with_visibility(Visibility::Private)
                                .with_transient(true),
                        ),
                ),
        )
        .and_then(|s| {
            s.with_package(
                Package::new("org.example.util").with_type(
                    TypeDecl::class("Limits")
                        .with_modifiers(Modifiers::new(Visibility::Public).with_final(true))
                        .with_field(
                            Field::new("MAX_SIZE", "int")
                                .with_modifiers(
                                    Modifiers::new(Visibility::Public)
                                        .with_static(true)
                                        .with_final(true),
                                )
                                .with_value("1024"),
                        ),
                ),
            )
        })
        .expect("fixture surface is well formed")
}

/// 1.1 版本：AbstractList.size 收紧为 protected，ArrayList 新增 remove，Limits 改名为 Bounds
pub fn collections_v2() -> Surface {
    Surface::new("collections-1.1")
        .with_package(
            Package::new("org.example.collect")
                .with_doc("Collection types.")
                .with_type(
                    TypeDecl::interface("Container")
                        .with_method(Method::new("size", "int"))
                        .with_method(Method::new("isEmpty", "boolean")),
                )
                .with_type(
                    TypeDecl::class("AbstractList")
                        .with_abstract(true)
                        .implements("org.example.collect.Container")
                        .with_constructor(Constructor::new(&[]).with_visibility(Visibility::Protected))
                        .with_method(Method::new("size", "int").with_visibility(Visibility::Protected))
                        .with_method(Method::new("isEmpty", "boolean"))
                        .with_method(
                            Method::new("get", "Object")
                                .with_param("index", "int")
                                .with_abstract(true),
                        )
                        .with_field(
                            Field::new("modCount", "int").with_visibility(Visibility::Protected),
                        ),
                )
                .with_type(
                    TypeDecl::class("ArrayList")
                        .extends("org.example.collect.AbstractList")
                        .with_constructor(Constructor::new(&[]))
                        .with_constructor(Constructor::new(&["int"]))
                        .with_method(Method::new("get", "Object").with_param("index", "int"))
                        .with_method(Method::new("add", "boolean").with_param("e", "Object"))
                        .with_method(Method::new("remove", "Object").with_param("index", "int"))
                        .with_method(
                            Method::new("trimToSize", "void").with_visibility(Visibility::Package),
                        )
                        .with_field(
                            Field::new("elementData", "Object[]")
                                .with_visibility(Visibility::Private)
                                .with_transient(true),
                        ),
                ),
        )
        .and_then(|s| {
            s.with_package(
                Package::new("org.example.util").with_type(
                    TypeDecl::class("Bounds")
                        .with_modifiers(Modifiers::new(Visibility::Public).with_final(true))
                        .with_field(
                            Field::new("MAX_SIZE", "int")
                                .with_modifiers(
                                    Modifiers::new(Visibility::Public)
                                        .with_static(true)
                                        .with_final(true),
                                )
                                .with_value("1024"),
                        ),
                ),
            )
        })
        .expect("fixture surface is well formed")
}

/// 生成指定规模的合成接口面，`variant` 不同的两份之间每隔几个成员有一处差异
pub fn synthetic(name: &str, packages: usize, types: usize, members: usize, variant: usize) -> Surface {
    let mut surface = Surface::new(name);
    for p in 0..packages {
        let mut package = Package::new(format!("gen.p{p}"));
        for t in 0..types {
            let mut decl = TypeDecl::class(format!("T{t}"));
            if t > 0 {
                decl = decl.extends(format!("gen.p{p}.T{}", t - 1));
            }
            for m in 0..members {
                let return_type = if variant > 0 && m % 7 == 0 { "long" } else { "int" };
                decl = decl
                    .with_method(Method::new(format!("m{t}_{m}"), return_type).with_param("x", "int"))
                    .with_field(Field::new(format!("f{t}_{m}"), "String"));
            }
            if variant > 0 && t % 3 == 0 {
                decl = decl.with_method(Method::new(format!("extra{t}"), "void"));
            }
            package = package.with_type(decl);
        }
        surface
            .add_package(package)
            .expect("synthetic packages are unique");
    }
    surface
}
