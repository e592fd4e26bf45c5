//! Persisted client-side session state.
//!
//! A small string key-value store holds the bearer token (`authToken`), the
//! cached signed-in user (`user`), and the scratch values of the two-step
//! registration flow. [`FileStore`] persists to a JSON file; [`MemoryStore`]
//! keeps everything in process. The API client only ever sees the store
//! through [`TokenProvider`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::matching::{EmotionalProfile, PlanTier};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";
pub const TEMP_USER_NAME_KEY: &str = "tempUserName";
pub const TEMP_USER_EMAIL_KEY: &str = "tempUserEmail";
pub const SELECTED_PLAN_KEY: &str = "selectedPlanId";

/// Source of the bearer token attached to API requests.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A durable string-to-string store.
pub trait KeyValueStore: TokenProvider {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Always anonymous. Useful for endpoints that must not carry credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. one passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    // Entries are plain strings, so a poisoned map is still consistent.
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenProvider for MemoryStore {
    fn token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file is read once on open and rewritten on every change (temp file +
/// rename). A missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read session file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("corrupt session file: {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "session store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path).context("failed to rename temp file")?;
        Ok(())
    }
}

impl TokenProvider for FileStore {
    fn token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// The signed-in user as cached under `user`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub plan: Option<PlanTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_profile: Option<EmotionalProfile>,
}

impl User {
    pub fn plan_tier(&self) -> PlanTier {
        self.plan.unwrap_or_default()
    }
}

/// Sign-in state on top of a [`KeyValueStore`].
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist the token and user returned by a successful login.
    pub fn sign_in(&self, token: &str, user: &User) -> Result<()> {
        self.store.set(AUTH_TOKEN_KEY, token)?;
        self.save_user(user)?;
        tracing::info!(user = %user.id, "signed in");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.token().is_some()
    }

    /// The cached user. `None` unless both the token and the user are stored.
    pub fn current_user(&self) -> Result<Option<User>> {
        if self.store.token().is_none() {
            return Ok(None);
        }
        match self.store.get(USER_KEY) {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).context("corrupt cached user")?,
            )),
            None => Ok(None),
        }
    }

    fn save_user(&self, user: &User) -> Result<()> {
        self.store.set(USER_KEY, &serde_json::to_string(user)?)
    }

    fn update_user(&self, change: impl FnOnce(&mut User)) -> Result<User> {
        let mut user = self
            .current_user()?
            .context("not signed in; run `aitolove login` first")?;
        change(&mut user);
        self.save_user(&user)?;
        Ok(user)
    }

    /// Replace the cached user's emotional profile.
    pub fn update_emotional_profile(&self, profile: EmotionalProfile) -> Result<User> {
        self.update_user(|user| user.emotional_profile = Some(profile))
    }

    pub fn mark_email_verified(&self) -> Result<User> {
        self.update_user(|user| user.email_verified = true)
    }

    pub fn set_plan(&self, plan: PlanTier) -> Result<User> {
        self.update_user(|user| user.plan = Some(plan))
    }

    /// Stash the name and email entered in the first registration step.
    pub fn remember_registration(&self, name: &str, email: &str) -> Result<()> {
        self.store.set(TEMP_USER_NAME_KEY, name)?;
        self.store.set(TEMP_USER_EMAIL_KEY, email)
    }

    /// Take back the stashed registration details, clearing them.
    pub fn take_registration(&self) -> Result<(Option<String>, Option<String>)> {
        let name = self.store.get(TEMP_USER_NAME_KEY);
        let email = self.store.get(TEMP_USER_EMAIL_KEY);
        self.store.remove(TEMP_USER_NAME_KEY)?;
        self.store.remove(TEMP_USER_EMAIL_KEY)?;
        Ok((name, email))
    }

    pub fn select_plan_id(&self, plan_id: &str) -> Result<()> {
        self.store.set(SELECTED_PLAN_KEY, plan_id)
    }

    pub fn selected_plan_id(&self) -> Option<String> {
        self.store.get(SELECTED_PLAN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user123".into(),
            name: "Ana".into(),
            email: "ana@exemplo.com".into(),
            email_verified: false,
            plan: Some(PlanTier::Basic),
            emotional_profile: None,
        }
    }

    #[test]
    fn memory_store_token_reads_auth_key() {
        let store = MemoryStore::new();
        assert!(store.token().is_none());
        store.set(AUTH_TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));
        store.set("other", "x").unwrap();
        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set(AUTH_TOKEN_KEY, "persisted").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("persisted"));
        reopened.remove(AUTH_TOKEN_KEY).unwrap();

        let again = FileStore::open(&path).unwrap();
        assert!(again.token().is_none());
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn sign_in_then_out() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(session.current_user().unwrap().is_none());

        session.sign_in("jwt", &user()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap(), Some(user()));

        session.sign_out().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.store().get(USER_KEY).is_none());
    }

    #[test]
    fn profile_update_requires_sign_in() {
        let session = Session::new(MemoryStore::new());
        assert!(session
            .update_emotional_profile(EmotionalProfile::default())
            .is_err());

        session.sign_in("jwt", &user()).unwrap();
        let profile = EmotionalProfile {
            interests: vec!["Arte".into()],
            ..Default::default()
        };
        let updated = session.update_emotional_profile(profile.clone()).unwrap();
        assert_eq!(updated.emotional_profile, Some(profile));
        assert_eq!(
            session.current_user().unwrap().unwrap().emotional_profile,
            updated.emotional_profile
        );
    }

    #[test]
    fn verify_and_plan_updates() {
        let session = Session::new(MemoryStore::new());
        session.sign_in("jwt", &user()).unwrap();
        assert!(session.mark_email_verified().unwrap().email_verified);
        assert_eq!(session.set_plan(PlanTier::Vip).unwrap().plan_tier(), PlanTier::Vip);
    }

    #[test]
    fn registration_scratch_is_taken_once() {
        let session = Session::new(MemoryStore::new());
        session.remember_registration("Ana", "ana@exemplo.com").unwrap();
        let (name, email) = session.take_registration().unwrap();
        assert_eq!(name.as_deref(), Some("Ana"));
        assert_eq!(email.as_deref(), Some("ana@exemplo.com"));
        assert_eq!(session.take_registration().unwrap(), (None, None));
    }

    #[test]
    fn shared_store_backs_both_session_and_token_provider() {
        let store = Arc::new(MemoryStore::new());
        let provider: Arc<dyn TokenProvider> = store.clone();
        let session = Session::new(Arc::clone(&store));
        session.sign_in("shared", &user()).unwrap();
        assert_eq!(provider.token().as_deref(), Some("shared"));
    }

    #[test]
    fn user_plan_null_is_unset() {
        let user: User =
            serde_json::from_str(r#"{"id":"u","name":"n","email":"e","plan":null}"#).unwrap();
        assert_eq!(user.plan_tier(), PlanTier::Unset);
    }
}
