//! Shared in-memory fixtures for unit tests.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use thiserror::Error;

use crate::PetStorage;
use crate::auth::{AuthClient, AuthError, UserId, validate_credentials};
use crate::storage::PetDocument;

#[derive(Clone, Default)]
pub(crate) struct MemoryStorage {
    saves: Rc<RefCell<HashMap<String, PetDocument>>>,
}

impl PetStorage for MemoryStorage {
    type Error = Infallible;

    fn load_pet(&self, user_id: &str) -> Result<Option<PetDocument>, Self::Error> {
        Ok(self.saves.borrow().get(user_id).cloned())
    }

    fn save_pet(&self, user_id: &str, document: &PetDocument) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(user_id.to_string(), document.clone());
        Ok(())
    }

    fn delete_pet(&self, user_id: &str) -> Result<(), Self::Error> {
        self.saves.borrow_mut().remove(user_id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("storage offline")]
pub(crate) struct StorageOffline;

/// Loads succeed with an empty store; every write fails.
#[derive(Clone, Copy, Default)]
pub(crate) struct FailingStorage;

impl PetStorage for FailingStorage {
    type Error = StorageOffline;

    fn load_pet(&self, _user_id: &str) -> Result<Option<PetDocument>, Self::Error> {
        Ok(None)
    }

    fn save_pet(&self, _user_id: &str, _document: &PetDocument) -> Result<(), Self::Error> {
        Err(StorageOffline)
    }

    fn delete_pet(&self, _user_id: &str) -> Result<(), Self::Error> {
        Err(StorageOffline)
    }
}

/// Accepts any structurally valid credentials and keys users by email.
#[derive(Clone, Default)]
pub(crate) struct FixtureAuth {
    registered: Rc<RefCell<HashMap<String, String>>>,
}

impl AuthClient for FixtureAuth {
    fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        validate_credentials(email, password)?;
        let mut registered = self.registered.borrow_mut();
        if registered.contains_key(email) {
            return Err(AuthError::AlreadyRegistered);
        }
        registered.insert(email.to_string(), password.to_string());
        Ok(UserId(format!("uid-{email}")))
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        validate_credentials(email, password)?;
        match self.registered.borrow().get(email) {
            Some(stored) if stored == password => Ok(UserId(format!("uid-{email}"))),
            _ => Err(AuthError::WrongCredentials),
        }
    }

    fn sign_out(&self) {}
}
