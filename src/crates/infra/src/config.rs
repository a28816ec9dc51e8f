use config::{Config, Environment, File};
use domain::value::Owner;
use dotenvy::dotenv;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    /// 日志文件路径
    log_file: String,
    reconcile: RawReconcileConfig,
}

/// 漂移修复配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawReconcileConfig {
    /// 只报告，不修改视图
    dry_run: bool,
    /// 默认检查的 owner 列表
    owners: Vec<String>,
}

impl Default for RawReconcileConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            owners: Vec::new(),
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            log_file: "log/albums_view.log".to_string(),
            reconcile: RawReconcileConfig::default(),
        }
    }
}

/// 漂移修复配置
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileConfig {
    pub dry_run: bool,
    pub owners: Vec<Owner>,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    database_url: String,
    log_file: String,
    reconcile: ReconcileConfig,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Self {
        let reconcile = ReconcileConfig {
            dry_run: data.reconcile.dry_run,
            owners: data
                .reconcile
                .owners
                .into_iter()
                .filter(|owner| !owner.trim().is_empty())
                .map(Owner::from)
                .collect(),
        };
        AppConfigImpl {
            database_url: data.database_url,
            log_file: data.log_file,
            reconcile,
        }
    }

    /// Reads `config.toml` (optional) then `APP__*` variables, `.env` included.
    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        Ok(AppConfigImpl::new(raw))
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone()
    }

    pub fn log_file(&self) -> String {
        self.log_file.clone()
    }

    pub fn reconcile(&self) -> ReconcileConfig {
        self.reconcile.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_dry_run_without_owners() {
        let config = AppConfigImpl::new(RawConfig::default());

        assert!(config.reconcile().dry_run);
        assert!(config.reconcile().owners.is_empty());
        assert_eq!(config.log_file(), "log/albums_view.log");
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let raw: RawConfig = Config::builder()
            .set_override("database_url", "postgres://localhost/albums")
            .unwrap()
            .set_override("reconcile.owners", vec!["ironman", " ", "pepper"])
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let config = AppConfigImpl::new(raw);

        assert_eq!(config.database_url(), "postgres://localhost/albums");
        assert_eq!(
            config.reconcile(),
            ReconcileConfig {
                dry_run: true,
                owners: vec![Owner::from("ironman"), Owner::from("pepper")],
            }
        );
    }
}
