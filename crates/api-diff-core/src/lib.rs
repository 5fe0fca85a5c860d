//! api-diff-core - 结构化 API 差异分析核心库
//!
//! 比较同一个库两个版本的接口面（包、类型、构造函数、方法、字段），
//! 生成带有变化幅度评分的分层差异树。
//!
//! 典型流程：构建两个 [`Surface`]，通过 [`DiffRequest`] 先解析继承成员，
//! 再由 [`ApiComparator`] 比较，最后按需用 [`ApiDiff::sort`] 排序。

pub mod batch;
pub mod diff;
pub mod differ;
pub mod error;
pub mod magnitude;
pub mod model;
pub mod options;
pub mod ordering;
pub mod request;
pub mod resolver;

// 重新导出主要的公共 API
pub use batch::BatchComparator;
pub use diff::{ApiDiff, ClassDiff, DiffStatistics, MemberDiff, MemberKind, PackageDiff};
pub use differ::{ApiComparator, compare};
pub use error::{ApiDiffError, Result};
pub use magnitude::MagnitudeCalculator;
pub use model::{
    Constructor, DOC_PLACEHOLDER, Field, Method, MethodKey, Modifiers, NO_EXCEPTIONS, Package,
    Parameter, Surface, TypeDecl, Visibility,
};
pub use options::DiffOptions;
pub use ordering::{Ranked, SortOrder};
pub use request::DiffRequest;
pub use resolver::{InheritanceResolver, ResolutionStats, resolve};
