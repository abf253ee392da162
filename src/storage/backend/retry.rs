//! 数据库错误分类与重试
//!
//! SQLite 多连接并发写时会返回 BUSY / LOCKED，属于暂时性错误，
//! 在存储层内部以指数退避重试；主键冲突交给调用方换 ID；其余错误直接返回。

use std::future::Future;
use std::time::Duration;

use sea_orm::error::{ConnAcquireErr, RuntimeErr};
use sea_orm::{DbErr, SqlErr};

/// SQLITE_BUSY / SQLITE_LOCKED 及其扩展码
const SQLITE_CONTENTION_CODES: &[&str] = &["5", "6", "261", "262", "517"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// 锁竞争或连接池暂时不可用，可以重试
    Transient,
    /// 主键 / 唯一约束冲突
    UniqueViolation,
    Fatal,
}

pub fn classify(err: &DbErr) -> ErrorClass {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || mentions(err.to_string(), &["unique constraint failed"])
    {
        return ErrorClass::UniqueViolation;
    }

    let transient = match err {
        // `close` 之后仍在途的操作会拿到 ConnectionClosed
        DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed) => false,
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime) | DbErr::Query(runtime) => is_contention(runtime),
        _ => false,
    };

    if transient {
        ErrorClass::Transient
    } else {
        ErrorClass::Fatal
    }
}

fn is_contention(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            match code {
                Some(code) => SQLITE_CONTENTION_CODES.contains(&code.as_str()),
                None => mentions(sqlx_err.to_string(), LOCK_MESSAGES),
            }
        }
        RuntimeErr::Internal(msg) => mentions(msg.clone(), LOCK_MESSAGES),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

const LOCK_MESSAGES: &[&str] = &[
    "database is locked",
    "database table is locked",
    "database is busy",
];

fn mentions(message: String, needles: &[&str]) -> bool {
    let lower = message.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// 重试参数，来自 `StoreConfig`
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 50,
            max_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// 第 `attempt` 次重试前的等待时间：base * 2^(attempt-1)，封顶后加 0-25% 抖动
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(32));
        let capped = exp.min(self.max_delay_ms);
        let jitter = rand::random_range(0..=capped / 4);
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// 执行 `operation`，遇到暂时性错误时退避重试，最多 `max_retries` 次
///
/// 最终的错误原样返回，调用方仍可用 [`classify`] 判断类型。
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt >= config.max_retries || classify(&err) != ErrorClass::Transient {
            return Err(err);
        }
        attempt += 1;
        tokio::time::sleep(config.backoff(attempt)).await;
    }
}
