// ==========================================
// 学生档案后端 - 应用配置
// ==========================================
// 来源: 环境变量（缺省时使用默认值）
//   STUDENT_RECORDS_DB_PATH  数据库文件路径
//   STUDENT_RECORDS_BIND     HTTP 监听地址
//   RUST_LOG                 日志级别过滤器
//   STUDENT_RECORDS_LOG_JSON 为 1/true 时输出 JSON 日志
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_ENV: &str = "STUDENT_RECORDS_DB_PATH";
pub const BIND_ENV: &str = "STUDENT_RECORDS_BIND";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
pub const LOG_JSON_ENV: &str = "STUDENT_RECORDS_LOG_JSON";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("监听地址格式错误 ({value}): {message}")]
    InvalidBindAddr { value: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub log_json: bool,
}

impl AppConfig {
    /// 从进程环境加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（便于测试）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = non_empty(DB_PATH_ENV).unwrap_or_else(get_default_db_path);

        let bind_raw = non_empty(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                message: e.to_string(),
            })?;

        let log_filter =
            non_empty(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let log_json = non_empty(LOG_JSON_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            db_path,
            bind_addr,
            log_filter,
            log_json,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先使用用户数据目录；取不到时回退到当前目录
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./student_records.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("student-records");
        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("student_records.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/tmp/alumnos.db"),
            (BIND_ENV, "0.0.0.0:8080"),
            (LOG_FILTER_ENV, "debug"),
            (LOG_JSON_ENV, "true"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, "/tmp/alumnos.db");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_filter, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_defaults_when_blank() {
        let config = AppConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  "), (BIND_ENV, "")])).unwrap();

        assert!(config.db_path.ends_with("student_records.db"));
        assert_eq!(config.bind_addr, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.log_json);
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = AppConfig::from_lookup(lookup(&[(DB_PATH_ENV, "x.db"), (BIND_ENV, "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }
}
