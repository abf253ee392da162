//! URL 验证模块
//!
//! 只接受带 scheme 与 host 的绝对 URL，并阻止可执行脚本的协议

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    SurroundingWhitespace,
    DangerousProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "URL must not start or end with whitespace")
            }
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::MissingHost => write!(f, "URL must be absolute with a host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 取出原文中 `scheme://` 之后的 authority 段
///
/// url crate 会为 http/https 补全 `http:example.com` 这类缺少 `//` 的写法，
/// 而存储与重定向使用的是原文，所以这里按原文判断。
fn raw_authority(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// 验证目标 URL
///
/// 检查项目：
/// 1. URL 不为空，且首尾没有空白
/// 2. 不是危险协议（javascript:, data:, file: 等）
/// 3. 不含反斜杠，能解析为绝对 URL
/// 4. 原文带 `//` 与非空 authority，解析出的 host 非空
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // url crate 会静默去掉首尾空白，这里显式拒绝以保证存储的原文可解析
    if url.trim() != url {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url_lower = url.to_lowercase();
    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    if url.contains('\\') {
        return Err(UrlValidationError::InvalidFormat("backslash in URL".into()));
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if parsed.scheme().is_empty() {
        return Err(UrlValidationError::InvalidFormat("missing scheme".into()));
    }

    match raw_authority(url) {
        Some(authority) if !authority.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
