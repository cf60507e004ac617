use crate::application::lending::LendingPolicy;
use crate::domain::FinePolicy;
use std::str::FromStr;
use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// 貸出期間の上限（日数）
pub const MAX_LOAN_DURATION_DAYS: i64 = 36_500;

/// アプリケーション設定
///
/// 環境変数から読み込む。未設定の項目は既定値を使う。
/// - `PORT` (既定: 3000)
/// - `FINE_POLICY` = standard | student (既定: standard)
/// - `MAX_ACTIVE_LOANS` (既定: 5, 1以上)
/// - `LOAN_DURATION_DAYS` (既定: 14, 0以上 `MAX_LOAN_DURATION_DAYS` 以下)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub fine_policy: FinePolicy,
    pub lending_policy: LendingPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            fine_policy: FinePolicy::default(),
            lending_policy: LendingPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let fine_policy = match lookup("FINE_POLICY") {
            Some(raw) => raw
                .parse::<FinePolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "FINE_POLICY",
                    message,
                })?,
            None => defaults.fine_policy,
        };
        let max_active_loans = parse_or(
            &lookup,
            "MAX_ACTIVE_LOANS",
            defaults.lending_policy.max_active_loans,
        )?;
        let loan_duration_days = parse_or(
            &lookup,
            "LOAN_DURATION_DAYS",
            defaults.lending_policy.loan_duration_days,
        )?;

        if max_active_loans < 1 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_ACTIVE_LOANS",
                message: "must be at least 1".to_string(),
            });
        }
        if !(0..=MAX_LOAN_DURATION_DAYS).contains(&loan_duration_days) {
            return Err(ConfigError::InvalidValue {
                key: "LOAN_DURATION_DAYS",
                message: format!("must be between 0 and {}", MAX_LOAN_DURATION_DAYS),
            });
        }

        Ok(Self {
            port,
            fine_policy,
            lending_policy: LendingPolicy {
                max_active_loans,
                loan_duration_days,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.lending_policy.max_active_loans, 5);
        assert_eq!(config.lending_policy.loan_duration_days, 14);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("FINE_POLICY", "student"),
            ("MAX_ACTIVE_LOANS", "3"),
            ("LOAN_DURATION_DAYS", "21"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.fine_policy, FinePolicy::Student);
        assert_eq!(config.lending_policy.max_active_loans, 3);
        assert_eq!(config.lending_policy.loan_duration_days, 21);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "not-a-port")]),
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("FINE_POLICY", "vip")]),
            Err(ConfigError::InvalidValue { key: "FINE_POLICY", .. })
        ));
        assert!(matches!(
            config_from(&[("LOAN_DURATION_DAYS", "-1")]),
            Err(ConfigError::InvalidValue { key: "LOAN_DURATION_DAYS", .. })
        ));
    }

    #[test]
    fn test_loan_duration_upper_bound() {
        assert!(matches!(
            config_from(&[("LOAN_DURATION_DAYS", "200000000000000")]),
            Err(ConfigError::InvalidValue { key: "LOAN_DURATION_DAYS", .. })
        ));
        assert!(matches!(
            config_from(&[("LOAN_DURATION_DAYS", "36501")]),
            Err(ConfigError::InvalidValue { key: "LOAN_DURATION_DAYS", .. })
        ));

        let config = config_from(&[("LOAN_DURATION_DAYS", "36500")]).unwrap();
        assert_eq!(config.lending_policy.loan_duration_days, MAX_LOAN_DURATION_DAYS);
    }

    #[test]
    fn test_zero_max_active_loans_is_rejected() {
        assert!(matches!(
            config_from(&[("MAX_ACTIVE_LOANS", "0")]),
            Err(ConfigError::InvalidValue { key: "MAX_ACTIVE_LOANS", .. })
        ));

        let config = config_from(&[("MAX_ACTIVE_LOANS", "1")]).unwrap();
        assert_eq!(config.lending_policy.max_active_loans, 1);
    }
}
