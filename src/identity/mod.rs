//! Identity and guest mode.
//!
//! Federated sign-in happens outside this crate; what arrives here is the
//! resulting [`Identity`]. [`AuthContext`] holds the current identity and
//! the persisted guest flag, and hands out immutable [`AuthSnapshot`]s that
//! decide whether history is local-only or reconciled with the remote store.

use crate::config::Config;
use crate::history::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};

/// Key the guest flag is stored under unless configured otherwise.
pub const DEFAULT_GUEST_KEY: &str = "is_guest";

/// A durable user identity from the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Point-in-time view of who is playing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub identity: Option<Identity>,
    /// Playing without an identity by explicit choice. Never true while an
    /// identity is present.
    pub is_guest: bool,
}

impl AuthSnapshot {
    /// Whether anyone, guest or identity, is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some() || self.is_guest
    }
}

/// Current identity plus the persisted guest flag.
pub struct AuthContext<K: KeyValueStore> {
    kv: K,
    guest_key: String,
    identity: Option<Identity>,
    is_guest: bool,
}

impl<K: KeyValueStore> AuthContext<K> {
    /// Restore from storage. With no identity, the guest flag is read back.
    pub async fn load(kv: K, identity: Option<Identity>) -> Result<Self, StorageError> {
        Self::load_with_key(kv, DEFAULT_GUEST_KEY, identity).await
    }

    /// Restore using the guest key from `config`.
    pub async fn from_config(
        config: &Config,
        kv: K,
        identity: Option<Identity>,
    ) -> Result<Self, StorageError> {
        Self::load_with_key(kv, config.storage.guest_key.clone(), identity).await
    }

    pub async fn load_with_key(
        kv: K,
        guest_key: impl Into<String>,
        identity: Option<Identity>,
    ) -> Result<Self, StorageError> {
        let guest_key = guest_key.into();
        let is_guest = match identity {
            Some(_) => false,
            None => kv.get(&guest_key).await?.as_deref() == Some("true"),
        };
        Ok(Self {
            kv,
            guest_key,
            identity,
            is_guest,
        })
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            identity: self.identity.clone(),
            is_guest: self.is_guest,
        }
    }

    /// Continue without an identity; remembered across restarts.
    pub async fn login_as_guest(&mut self) -> Result<(), StorageError> {
        self.kv.set(&self.guest_key, "true").await?;
        self.is_guest = true;
        tracing::info!("playing as guest");
        Ok(())
    }

    /// Record the identity produced by a successful sign-in.
    pub fn sign_in(&mut self, identity: Identity) {
        tracing::info!(uid = %identity.uid, "signed in");
        self.identity = Some(identity);
        self.is_guest = false;
    }

    /// Drop the identity and forget the guest flag.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.kv.remove(&self.guest_key).await?;
        self.identity = None;
        self.is_guest = false;
        tracing::info!("signed out");
        Ok(())
    }
}
