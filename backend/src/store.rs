use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use poll_shared::{
    validate_poll_input, validate_username, seed_polls,
    Error, Poll, PollResults, Result, User,
};
use crate::storage::{Storage, StorageError, POLLS_KEY, SESSION_KEY};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Delay awaited at the start of every asynchronous operation.
    pub latency: Duration,
    pub seed: bool,
}

/// Owns the session record and the poll collection. Every read and write of
/// persisted state goes through here.
pub struct PollStore {
    storage: Box<dyn Storage>,
    latency: Duration,
    /// Held across every read-modify-write of a key, never across an await.
    writer: Mutex<()>,
}

impl PollStore {
    pub fn open(storage: Box<dyn Storage>, config: &StoreConfig) -> Result<Self> {
        let store = Self { storage, latency: config.latency, writer: Mutex::new(()) };
        if config.seed {
            store.seed_if_empty()?;
        }
        Ok(store)
    }

    /// Writes the example polls only when the collection key is absent.
    /// Returns whether anything was written.
    pub fn seed_if_empty(&self) -> Result<bool> {
        let _guard = self.write_lock()?;
        if self.storage.get(POLLS_KEY)?.is_some() {
            return Ok(false);
        }
        let polls = seed_polls();
        self.write_json(POLLS_KEY, &polls)?;
        info!("🌱 Seeded {} example polls", polls.len());
        Ok(true)
    }

    pub async fn sign_in(&self, username: &str) -> Result<User> {
        let username = validate_username(username)?;
        self.round_trip().await;

        let user = User::new(username);
        let _guard = self.write_lock()?;
        self.write_json(SESSION_KEY, &user)?;
        info!(user_id = %user.id, "Signed in {}", user.username);
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.round_trip().await;
        let _guard = self.write_lock()?;
        self.storage.remove(SESSION_KEY)?;
        debug!("Session cleared");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        self.read_json(SESSION_KEY)
    }

    /// All polls in insertion order.
    pub async fn list_polls(&self) -> Result<Vec<Poll>> {
        self.round_trip().await;
        self.read_polls()
    }

    pub async fn get_poll(&self, poll_id: &str) -> Result<Poll> {
        self.round_trip().await;
        self.find_poll(poll_id)
    }

    pub async fn results(&self, poll_id: &str) -> Result<PollResults> {
        self.round_trip().await;
        self.find_poll(poll_id).map(|poll| PollResults::from_poll(&poll))
    }

    pub async fn has_voted(&self, poll_id: &str, user_id: &str) -> Result<bool> {
        self.round_trip().await;
        self.find_poll(poll_id).map(|poll| poll.has_voted(user_id))
    }

    pub async fn create_poll<S: AsRef<str>>(&self, question: &str, options: &[S], user_id: &str) -> Result<Poll> {
        let draft = validate_poll_input(question, options)?;
        self.round_trip().await;

        let poll = Poll::from_draft(draft, user_id);
        let _guard = self.write_lock()?;
        let mut polls = self.read_polls()?;
        polls.push(poll.clone());
        self.write_json(POLLS_KEY, &polls)?;

        info!(poll_id = %poll.id, created_by = %user_id, "Created poll with {} options", poll.options.len());
        Ok(poll)
    }

    pub async fn cast_vote(&self, poll_id: &str, option_id: &str, user_id: &str) -> Result<Poll> {
        self.round_trip().await;

        let _guard = self.write_lock()?;
        let mut poll = self.find_poll(poll_id)?;
        let read_version = poll.version;
        let unattributed = poll.unattributed_votes();
        if let Err(e) = poll.cast_vote(option_id, user_id) {
            debug!(poll_id, user_id, "Vote rejected: {}", e);
            return Err(e);
        }
        debug_assert_eq!(poll.unattributed_votes(), unattributed);

        self.commit_locked(&poll, read_version)?;
        info!(poll_id, option_id, user_id, "Vote recorded");
        Ok(poll)
    }

    /// Replaces the stored poll only if nobody advanced its version since
    /// `read_version` was observed.
    pub(crate) fn commit_poll(&self, poll: &Poll, read_version: u64) -> Result<()> {
        let _guard = self.write_lock()?;
        self.commit_locked(poll, read_version)
    }

    /// Caller must hold the writer lock.
    fn commit_locked(&self, poll: &Poll, read_version: u64) -> Result<()> {
        let mut polls = self.read_polls()?;
        let stored = polls.iter_mut()
            .find(|p| p.id == poll.id)
            .ok_or_else(|| Error::not_found("poll not found"))?;

        if stored.version != read_version {
            warn!(poll_id = %poll.id, read_version, stored_version = stored.version, "Stale poll write rejected");
            return Err(Error::conflict("poll was modified concurrently"));
        }
        *stored = poll.clone();
        self.write_json(POLLS_KEY, &polls)
    }

    fn write_lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|_| StorageError::LockFailed.into())
    }

    fn find_poll(&self, poll_id: &str) -> Result<Poll> {
        self.read_polls()?
            .into_iter()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| Error::not_found("poll not found"))
    }

    fn read_polls(&self) -> Result<Vec<Poll>> {
        Ok(self.read_json(POLLS_KEY)?.unwrap_or_default())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.storage.get(key)? else { return Ok(None) };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| {
                error!("Failed to decode {}: {}", key, e);
                StorageError::Malformed { key: key.to_string(), reason: e.to_string() }.into()
            })
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Malformed { key: key.to_string(), reason: e.to_string() })?;
        self.storage.set(key, raw)?;
        Ok(())
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
