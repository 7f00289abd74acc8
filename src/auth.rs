//! Static allow-list login.
//!
//! Prototype-grade by design: a fixed credential table, no hashing. The
//! shell gates access on the persisted `currentUser` record — absence means
//! logged out and redirects to the login flow.

use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::{CurrentUser, CURRENT_USER_KEY};

struct StaticUser {
    id: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const USERS: &[StaticUser] = &[
    StaticUser {
        id: "admin",
        password: "password123",
        name: "Taro Sato",
        role: "admin",
    },
    StaticUser {
        id: "takahashi",
        password: "test123",
        name: "Jiro Takahashi",
        role: "user",
    },
    StaticUser {
        id: "suzuki",
        password: "test123",
        name: "Hanako Suzuki",
        role: "user",
    },
];

/// Check credentials against the allow-list. A match persists the
/// `currentUser` record and returns it; a miss returns `None` without
/// touching storage.
pub fn login<S>(store: &S, id: &str, password: &str) -> Result<Option<CurrentUser>, StoreError>
where
    S: RecordStore + ?Sized,
{
    match USERS.iter().find(|u| u.id == id && u.password == password) {
        Some(user) => {
            let current = CurrentUser {
                id: user.id.to_string(),
                name: user.name.to_string(),
                role: user.role.to_string(),
            };
            store.put(CURRENT_USER_KEY, &serde_json::to_string(&current)?)?;
            Ok(Some(current))
        }
        None => Ok(None),
    }
}

/// The logged-in user, if any. A corrupt record reads as logged out.
pub fn current_user<S>(store: &S) -> Result<Option<CurrentUser>, StoreError>
where
    S: RecordStore + ?Sized,
{
    match store.get(CURRENT_USER_KEY)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("currentUser record is corrupt ({e}); treating as logged out");
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// Clear the session record.
pub fn logout<S>(store: &S) -> Result<(), StoreError>
where
    S: RecordStore + ?Sized,
{
    store.remove(CURRENT_USER_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_login_round_trip() {
        let store = MemoryStore::new();
        let user = login(&store, "admin", "password123").unwrap().unwrap();
        assert_eq!(user.name, "Taro Sato");
        assert_eq!(user.role, "admin");

        let persisted = current_user(&store).unwrap().unwrap();
        assert_eq!(persisted, user);

        logout(&store).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_bad_credentials_leave_storage_untouched() {
        let store = MemoryStore::new();
        assert!(login(&store, "admin", "wrong").unwrap().is_none());
        assert!(login(&store, "nobody", "password123").unwrap().is_none());
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_session_record_reads_as_logged_out() {
        let store = MemoryStore::new();
        store.put(CURRENT_USER_KEY, "{broken").unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }
}
