//! 应用配置
//!
//! 配置来源依次为：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
//! `ACADIFY_` 前缀环境变量，以及少量常用环境变量的直接覆盖。

mod r#impl;
mod structs;

pub use structs::*;
