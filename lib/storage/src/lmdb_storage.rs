// LMDB-backed profile and match-log store
use anyhow::Result;
use chrono::{DateTime, Utc};
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vibematch_core::{Error, Gender, MatchLogStore, ProfileStore, UserId, UserProfile};

const DB_PROFILES: &str = "profiles";
const DB_MATCH_LOGS: &str = "match_logs";

const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024 * 1024; // 10GB

/// Value stored under a `from\0to` match-log key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatchLogRecord {
    timestamp: DateTime<Utc>,
}

/// Durable store for profiles (user id -> JSON) and the directional match log.
///
/// Every write runs in its own write transaction. LMDB allows one writer at a
/// time, which makes each upsert atomic per key.
pub struct LmdbStorage {
    env: Arc<Env>,
    profiles_db: Database<Str, Bytes>,
    match_logs_db: Database<Str, Bytes>,
}

impl LmdbStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_map_size(path, DEFAULT_MAP_SIZE)
    }

    pub fn with_map_size<P: AsRef<Path>>(path: P, map_size: usize) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .open(path.as_ref())?
        });

        let mut wtxn = env.write_txn()?;
        let profiles_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(DB_PROFILES))?;
        let match_logs_db: Database<Str, Bytes> =
            env.create_database(&mut wtxn, Some(DB_MATCH_LOGS))?;
        wtxn.commit()?;

        info!("LMDB storage opened at {:?}", path.as_ref());

        Ok(Self {
            env,
            profiles_db,
            match_logs_db,
        })
    }

    /// `from\0to`; ids containing NUL would make the key ambiguous
    fn match_key(from: &UserId, to: &UserId) -> Result<String> {
        if from.as_str().contains('\0') || to.as_str().contains('\0') {
            anyhow::bail!("user id contains NUL: {:?} -> {:?}", from.as_str(), to.as_str());
        }
        Ok(format!("{}\u{0}{}", from, to))
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let data = serde_json::to_vec(profile)?;
        let mut wtxn = self.env.write_txn()?;
        self.profiles_db.put(&mut wtxn, profile.user_id.as_str(), &data)?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let rtxn = self.env.read_txn()?;
        match self.profiles_db.get(&rtxn, user_id.as_str())? {
            Some(data) => Ok(Some(serde_json::from_slice(data)?)),
            None => Ok(None),
        }
    }

    /// Profiles of `gender` in key order, skipping `exclude`
    pub fn scan_profiles(&self, gender: &Gender, exclude: &UserId) -> Result<Vec<UserProfile>> {
        let rtxn = self.env.read_txn()?;
        let mut profiles = Vec::new();
        for result in self.profiles_db.iter(&rtxn)? {
            let (key, data) = result?;
            if key == exclude.as_str() {
                continue;
            }
            let profile: UserProfile = serde_json::from_slice(data)?;
            if &profile.gender == gender {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    pub fn save_match(&self, from: &UserId, to: &UserId, at: DateTime<Utc>) -> Result<()> {
        let key = Self::match_key(from, to)?;
        let data = bincode::serialize(&MatchLogRecord { timestamp: at })?;
        let mut wtxn = self.env.write_txn()?;
        self.match_logs_db.put(&mut wtxn, &key, &data)?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn load_match(&self, from: &UserId, to: &UserId) -> Result<Option<DateTime<Utc>>> {
        let key = Self::match_key(from, to)?;
        let rtxn = self.env.read_txn()?;
        match self.match_logs_db.get(&rtxn, &key)? {
            Some(data) => {
                let record: MatchLogRecord = bincode::deserialize(data)?;
                Ok(Some(record.timestamp))
            }
            None => Ok(None),
        }
    }

    pub fn profile_count(&self) -> Result<u64> {
        let rtxn = self.env.read_txn()?;
        Ok(self.profiles_db.len(&rtxn)?)
    }

    pub fn match_log_len(&self) -> Result<u64> {
        let rtxn = self.env.read_txn()?;
        Ok(self.match_logs_db.len(&rtxn)?)
    }
}

fn storage_err(e: anyhow::Error) -> Error {
    Error::Storage(e.to_string())
}

impl ProfileStore for LmdbStorage {
    fn get_profile(&self, user_id: &UserId) -> vibematch_core::Result<Option<UserProfile>> {
        self.load_profile(user_id).map_err(storage_err)
    }

    fn query_profiles(&self, gender: &Gender, exclude: &UserId) -> vibematch_core::Result<Vec<UserProfile>> {
        self.scan_profiles(gender, exclude).map_err(storage_err)
    }

    fn upsert_profile(&self, profile: UserProfile) -> vibematch_core::Result<()> {
        profile.validate()?;
        self.save_profile(&profile).map_err(storage_err)
    }
}

impl MatchLogStore for LmdbStorage {
    fn last_match(&self, from: &UserId, to: &UserId) -> vibematch_core::Result<Option<DateTime<Utc>>> {
        self.load_match(from, to).map_err(storage_err)
    }

    fn upsert_match(&self, from: &UserId, to: &UserId, at: DateTime<Utc>) -> vibematch_core::Result<()> {
        self.save_match(from, to, at).map_err(storage_err)
    }
}
