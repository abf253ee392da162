pub mod url_validator;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRng;
use rand::rngs::SysRng;

use crate::errors::{Result, SnaplinkError};

/// 短链接 ID 长度
pub const ID_LENGTH: usize = 6;

/// 生成 URL 安全的随机短 ID
///
/// 直接从操作系统熵源取 `ID_LENGTH` 字节，
/// 以无填充的 URL-safe base64 编码后截取前 `ID_LENGTH` 个字符。
/// 熵源不可用时返回 `Generation` 错误；生成时不保证唯一，冲突由存储层检测并重试。
pub fn generate_id() -> Result<String> {
    let mut bytes = [0u8; ID_LENGTH];
    SysRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SnaplinkError::generation(format!("entropy source unavailable: {}", e)))?;
    Ok(encode_id(&bytes))
}

fn encode_id(bytes: &[u8]) -> String {
    let mut encoded = URL_SAFE_NO_PAD.encode(bytes);
    encoded.truncate(ID_LENGTH);
    encoded
}

/// 判断字符串是否可能是本服务签发的 ID
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
