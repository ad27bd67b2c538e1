//! Anonymous identity bootstrap
//!
//! One identity per client, stored under its own key, separate from the
//! forum aggregate. Creation happens once; every later call returns the
//! stored record unchanged.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

use crate::model::User;
use crate::storage::{read_json, write_json, Medium, StorageError, StorageResult};

use super::display_name::display_name;
use super::palette::pick_color;

/// Storage key of the default client's identity
pub const DEFAULT_IDENTITY_KEY: &str = "current_user";

/// Returns the identity key for a named client, or the default key.
pub fn identity_key(client: Option<&str>) -> String {
    match client {
        Some(name) if !name.is_empty() => format!("{}.{}", DEFAULT_IDENTITY_KEY, name),
        _ => DEFAULT_IDENTITY_KEY.to_string(),
    }
}

/// Issues and persists the client's anonymous identity.
pub struct IdentityProvider {
    medium: Arc<dyn Medium>,
    key: String,
    /// Also serializes bootstrap so two callers cannot both create an identity
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl IdentityProvider {
    /// Creates a provider with an entropy-seeded random source.
    pub fn new(medium: Arc<dyn Medium>, key: impl Into<String>) -> Self {
        Self::with_rng(medium, key, Box::new(StdRng::from_entropy()))
    }

    /// Creates a provider drawing ids and colors from `rng`.
    pub fn with_rng(
        medium: Arc<dyn Medium>,
        key: impl Into<String>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            medium,
            key: key.into(),
            rng: Mutex::new(rng),
        }
    }

    /// Returns the storage key this provider reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored identity without creating one.
    pub fn stored(&self) -> StorageResult<Option<User>> {
        read_json(self.medium.as_ref(), &self.key)
    }

    /// Ensures an identity exists and returns it.
    ///
    /// The first call generates an id and color, persists them, and returns
    /// the new user. Later calls return the stored user as-is.
    ///
    /// # Errors
    ///
    /// `QRM_STORAGE_UNAVAILABLE` if the medium fails, `QRM_DATA_CORRUPTION`
    /// if the stored identity cannot be decoded.
    pub fn initialize(&self) -> StorageResult<User> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| StorageError::unavailable_no_source("identity lock poisoned"))?;

        if let Some(user) = self.stored()? {
            return Ok(user);
        }

        let user = generate_user(&mut **rng);
        write_json(self.medium.as_ref(), &self.key, &user)?;
        Ok(user)
    }

    /// Alias of [`IdentityProvider::initialize`] for callers that only read.
    pub fn current_user(&self) -> StorageResult<User> {
        self.initialize()
    }
}

fn generate_user<R: RngCore + ?Sized>(rng: &mut R) -> User {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();

    User {
        id,
        display_name: display_name(&id.to_string()),
        color: pick_color(rng).to_string(),
    }
}
