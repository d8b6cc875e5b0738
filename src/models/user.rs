use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::BusinessError;
use crate::response::ResultCode;

/// An account in the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub age: i32,
    /// Account balance in cents
    pub balance: i64,
}

/// Payload for creating a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name, must not be empty
    #[validate(length(min = 1, message = "name required"))]
    pub name: String,
    /// Age in years
    #[validate(range(min = 1, message = "age must be positive"))]
    pub age: i32,
    /// Opening balance in cents
    #[serde(default)]
    pub balance: i64,
}

/// Payload for a balance transfer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferRequest {
    /// Receiving user id
    pub to: u64,
    /// Amount in cents
    pub amount: i64,
}

/// Pagination parameters for listings
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PageParams {
    /// Page number, starts at 1
    pub page: Option<usize>,
    /// Results per page (default 20, max 100)
    pub page_size: Option<usize>,
}

/// In-process user directory shared across handlers.
///
/// Stands in for the storage a real deployment would have; the response
/// contract does not depend on how accounts are kept.
pub struct UserDirectory {
    users: RwLock<HashMap<u64, User>>,
    next_id: AtomicU64,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Directory preloaded with a few demo accounts
    pub fn seeded() -> Self {
        let directory = Self::new();
        directory.insert(CreateUserRequest {
            name: "alice".to_string(),
            age: 34,
            balance: 10_000,
        });
        directory.insert(CreateUserRequest {
            name: "bob".to_string(),
            age: 28,
            balance: 2_500,
        });
        directory.insert(CreateUserRequest {
            name: "carol".to_string(),
            age: 41,
            balance: 0,
        });
        directory
    }

    pub fn insert(&self, request: CreateUserRequest) -> User {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let user = User {
            id,
            name: request.name,
            age: request.age,
            balance: request.balance,
        };
        self.users
            .write()
            .expect("user directory lock poisoned")
            .insert(id, user.clone());
        user
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.users
            .read()
            .expect("user directory lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Page of users ordered by id, plus the total count
    pub fn list(&self, page: usize, page_size: usize) -> (Vec<User>, usize) {
        let users = self.users.read().expect("user directory lock poisoned");
        let total = users.len();

        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);

        let start = (page - 1) * page_size;
        let page_items = all.into_iter().skip(start).take(page_size).collect();
        (page_items, total)
    }

    /// Move `amount` cents between two accounts.
    ///
    /// Returns the updated source account. Missing accounts and insufficient
    /// funds are expected business rejections.
    pub fn transfer(&self, from: u64, to: u64, amount: i64) -> Result<User, BusinessError> {
        let mut users = self.users.write().expect("user directory lock poisoned");

        let source = users
            .get(&from)
            .ok_or_else(|| BusinessError::from_code(ResultCode::NotFound))?
            .clone();
        if !users.contains_key(&to) {
            return Err(BusinessError::from_code(ResultCode::NotFound));
        }
        if source.balance < amount {
            return Err(BusinessError::new("insufficient balance"));
        }

        if let Some(u) = users.get_mut(&from) {
            u.balance -= amount;
        }
        if let Some(u) = users.get_mut(&to) {
            u.balance += amount;
        }
        Ok(users[&from].clone())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let directory = UserDirectory::new();
        let first = directory.insert(CreateUserRequest {
            name: "alice".to_string(),
            age: 34,
            balance: 0,
        });
        let second = directory.insert(CreateUserRequest {
            name: "bob".to_string(),
            age: 28,
            balance: 0,
        });
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_get_missing_user() {
        let directory = UserDirectory::seeded();
        assert!(directory.get(999).is_none());
    }

    #[test]
    fn test_list_pages_ordered_by_id() {
        let directory = UserDirectory::seeded();
        let (first_page, total) = directory.list(1, 2);
        assert_eq!(total, 3);
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].id, 1);
        assert_eq!(first_page[1].id, 2);

        let (second_page, _) = directory.list(2, 2);
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, 3);
    }

    #[test]
    fn test_transfer_moves_balance() {
        let directory = UserDirectory::seeded();
        let updated = directory.transfer(1, 2, 1_000).unwrap();
        assert_eq!(updated.balance, 9_000);
        assert_eq!(directory.get(2).unwrap().balance, 3_500);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let directory = UserDirectory::seeded();
        let err = directory.transfer(3, 1, 1).unwrap_err();
        assert_eq!(err.code(), 600);
        assert_eq!(err.message(), "insufficient balance");
    }

    #[test]
    fn test_transfer_missing_account() {
        let directory = UserDirectory::seeded();
        let err = directory.transfer(1, 999, 1).unwrap_err();
        assert_eq!(err.code(), 404);
    }
}
