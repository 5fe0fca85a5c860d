use thiserror::Error;

/// api-diff 的错误类型定义
#[derive(Error, Debug)]
pub enum ApiDiffError {
    #[error("Duplicate package '{package}' in surface '{surface}'")]
    DuplicatePackage { surface: String, package: String },

    #[error("Duplicate type '{name}' in package '{package}' of surface '{surface}'")]
    DuplicateType {
        surface: String,
        package: String,
        name: String,
    },

    #[error("Duplicate {kind} '{key}' in type '{type_name}' of surface '{surface}'")]
    DuplicateMember {
        surface: String,
        type_name: String,
        kind: &'static str,
        key: String,
    },

    #[error("Missing required field '{field}' at {location}")]
    MissingField {
        location: String,
        field: &'static str,
    },

    #[error("Cyclic inheritance detected for type '{type_name}': {chain}")]
    CyclicInheritance { type_name: String, chain: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// 项目通用的 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiDiffError>;
