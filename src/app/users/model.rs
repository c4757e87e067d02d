//! 用户数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use uuid::{Uuid, Variant};
use validator::Validate;

use crate::core::error::ApiError;

/// 规范连字符格式的 UUID 长度
const HYPHENATED_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub age: Number,
    pub hobbies: Vec<Value>,
}

impl User {
    pub fn from_payload(id: Uuid, payload: UserPayload) -> Self {
        Self {
            id,
            username: payload.username,
            age: payload.age,
            hobbies: payload.hobbies,
        }
    }

    /// 按文本精确比较 id（小写连字符格式），大小写不同视为不同的 id
    pub fn has_id(&self, raw: &str) -> bool {
        let mut buf = Uuid::encode_buffer();
        let text: &str = self.id.hyphenated().encode_lower(&mut buf);
        text == raw
    }
}

/// 创建和更新共用的请求体
///
/// 多余字段（包括 `id`）会被忽略；`hobbies` 的元素类型不做检查。
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(length(min = 1))]
    pub username: String,
    pub age: Number,
    pub hobbies: Vec<Value>,
}

impl UserPayload {
    /// 解析并校验完整读取的请求体
    ///
    /// 无法解析为 JSON（或为 `null`）时返回 [`ApiError::InvalidJson`]，
    /// 能解析但字段缺失或类型不对时返回 [`ApiError::InvalidUserData`]。
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)?;
        if value.is_null() {
            return Err(ApiError::InvalidJson);
        }
        // 结构体也能从数组反序列化，这里只接受对象
        if !value.is_object() {
            return Err(ApiError::InvalidUserData);
        }

        let payload: UserPayload =
            serde_json::from_value(value).map_err(|_| ApiError::InvalidUserData)?;
        payload.validate().map_err(|_| ApiError::InvalidUserData)?;
        Ok(payload)
    }
}

/// 校验路径中的用户 id
///
/// 只接受 36 位连字符格式（大小写不敏感），版本号 1-8 且为 RFC 4122 变体；
/// 全 0 和全 f 的 UUID 也视为合法。
pub fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    if raw.len() != HYPHENATED_LEN {
        return Err(ApiError::InvalidUuid);
    }
    let id = Uuid::parse_str(raw).map_err(|_| ApiError::InvalidUuid)?;

    if id.is_nil() || id.as_u128() == u128::MAX {
        return Ok(id);
    }
    let version_ok = matches!(id.get_version_num(), 1..=8);
    if version_ok && id.get_variant() == Variant::RFC4122 {
        Ok(id)
    } else {
        Err(ApiError::InvalidUuid)
    }
}
