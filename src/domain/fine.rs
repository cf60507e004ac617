use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;
use std::str::FromStr;

use super::{Loan, Money};

/// 延滞料金の計算ポリシー
///
/// 貸出の経過時間から延滞料金を求める。実装は差し替え可能。
pub trait FineStrategy: Send + Sync {
    /// `as_of` 時点での延滞料金を計算する
    ///
    /// 貸出期間内であれば0を返す。
    fn calculate_fine(&self, loan: &Loan, loan_duration_days: i64, as_of: DateTime<Utc>) -> Money;
}

/// 延滞日数
///
/// 貸出日時から貸出期間を差し引いた経過時間のうち、満了した日数。
/// 期限前は0に切り上げる。
/// 貸出期間が `Duration` で表せないほど長い場合も期限前として扱う。
pub fn overdue_days(
    borrowed_at: DateTime<Utc>,
    loan_duration_days: i64,
    as_of: DateTime<Utc>,
) -> i64 {
    let Some(period) = Duration::try_days(loan_duration_days) else {
        return 0;
    };

    (as_of - borrowed_at)
        .checked_sub(&period)
        .map_or(0, |past_due| past_due.num_days().max(0))
}

/// 日額制の延滞料金
///
/// 延滞1日あたり `daily_rate` を課す。標準と学生は日額のみが異なる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRateFine {
    daily_rate: Money,
}

impl DailyRateFine {
    pub fn new(daily_rate: Money) -> Self {
        Self { daily_rate }
    }

    /// 標準料金：1日0.50
    pub fn standard() -> Self {
        Self::new(Money::new(dec!(0.50)))
    }

    /// 学生料金：1日0.25（50%割引）
    pub fn student() -> Self {
        Self::new(Money::new(dec!(0.25)))
    }

    pub fn daily_rate(&self) -> Money {
        self.daily_rate
    }
}

impl FineStrategy for DailyRateFine {
    fn calculate_fine(&self, loan: &Loan, loan_duration_days: i64, as_of: DateTime<Utc>) -> Money {
        let days = overdue_days(loan.borrowed_at, loan_duration_days, as_of);
        if days == 0 {
            return Money::ZERO;
        }
        self.daily_rate.times(days)
    }
}

/// 設定で選択する料金体系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinePolicy {
    #[default]
    Standard,
    Student,
}

impl FinePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinePolicy::Standard => "standard",
            FinePolicy::Student => "student",
        }
    }

    /// 料金体系に対応する計算ポリシーを生成する
    pub fn strategy(&self) -> DailyRateFine {
        match self {
            FinePolicy::Standard => DailyRateFine::standard(),
            FinePolicy::Student => DailyRateFine::student(),
        }
    }
}

impl FromStr for FinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(FinePolicy::Standard),
            "student" => Ok(FinePolicy::Student),
            _ => Err(format!("Invalid fine policy: {}", s)),
        }
    }
}
