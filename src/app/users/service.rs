//! 用户业务服务：进程内存储

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use uuid::Uuid;

use super::model::{User, UserPayload};
use crate::core::service::UserRepository;

/// 按创建顺序保存用户的内存存储
///
/// 所有读写都经过同一把读写锁，同一时间最多只有一个写者。
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // 某个请求 panic 不应让存储永久不可用
    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryUserStore {
    fn list_all(&self) -> Vec<User> {
        self.read().clone()
    }

    fn find_by_id(&self, id: &str) -> Option<User> {
        self.read().iter().find(|user| user.has_id(id)).cloned()
    }

    fn insert(&self, payload: UserPayload) -> User {
        let mut users = self.write();
        let mut id = Uuid::new_v4();
        while users.iter().any(|user| user.id == id) {
            id = Uuid::new_v4();
        }

        let user = User::from_payload(id, payload);
        users.push(user.clone());
        debug!(%id, total = users.len(), "user created");
        user
    }

    fn replace(&self, id: &str, payload: UserPayload) -> Option<User> {
        let mut users = self.write();
        let slot = users.iter_mut().find(|user| user.has_id(id))?;
        *slot = User::from_payload(slot.id, payload);
        debug!(id, "user replaced");
        Some(slot.clone())
    }

    fn remove(&self, id: &str) -> bool {
        let mut users = self.write();
        match users.iter().position(|user| user.has_id(id)) {
            Some(index) => {
                users.remove(index);
                debug!(id, total = users.len(), "user removed");
                true
            }
            None => false,
        }
    }
}
