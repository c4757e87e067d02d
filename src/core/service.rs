//! 核心服务层模块

use crate::app::users::model::{User, UserPayload};

/// 用户存储 trait
///
/// 路由层只依赖这个 trait，具体存储由服务器实例在构造时注入。
/// 查找用的 id 是路径中的原始文本，与存储中的 id 按文本精确比较。
pub trait UserRepository: Send + Sync {
    /// 按插入顺序返回全部用户
    fn list_all(&self) -> Vec<User>;

    fn find_by_id(&self, id: &str) -> Option<User>;

    /// 生成新的 id 并追加到末尾
    fn insert(&self, payload: UserPayload) -> User;

    /// 原位整体替换，id 保持不变；不存在时返回 `None`
    fn replace(&self, id: &str, payload: UserPayload) -> Option<User>;

    /// 删除成功返回 `true`
    fn remove(&self, id: &str) -> bool;
}
