use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProvisionerError;

/// Current config version. Bump this when changing shape; each bump needs a
/// step in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_BACKOFF_SECS: u64 = 5;

pub const REGION_ENV: &str = "KINESYNC_REGION";
pub const PROFILE_ENV: &str = "KINESYNC_PROFILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Schema version. A missing version reads as the current one.
    #[serde(default)]
    pub config_version: u32,
    /// AWS region; falls back to the SDK's default chain when unset.
    #[serde(default)]
    pub region: Option<String>,
    /// Named profile from `~/.aws/config`.
    #[serde(default)]
    pub profile: Option<String>,
    /// Delay requested while the stream is mid-transition.
    #[serde(default = "default_backoff_secs")]
    pub transition_backoff_secs: u64,
    /// Delay requested after an encryption change was started.
    #[serde(default = "default_backoff_secs")]
    pub update_backoff_secs: u64,
}

fn default_backoff_secs() -> u64 {
    DEFAULT_BACKOFF_SECS
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            region: None,
            profile: None,
            transition_backoff_secs: DEFAULT_BACKOFF_SECS,
            update_backoff_secs: DEFAULT_BACKOFF_SECS,
        }
    }
}

impl SyncConfig {
    /// Read a config file, migrating older shapes.
    pub fn load(path: &Path) -> Result<Self, ProvisionerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProvisionerError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ProvisionerError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        let on_disk_version = u32::try_from(on_disk_version).map_err(|_| {
            ProvisionerError::Config(format!("config_version {on_disk_version} is out of range"))
        })?;

        let migrated = migrate(json, on_disk_version)?;
        Ok(serde_json::from_value(migrated)?)
    }

    /// Let `KINESYNC_REGION` / `KINESYNC_PROFILE` win over the file.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(REGION_ENV).ok(),
            std::env::var(PROFILE_ENV).ok(),
        )
    }

    pub fn apply_overrides(mut self, region: Option<String>, profile: Option<String>) -> Self {
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            self.region = Some(region);
        }
        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            self.profile = Some(profile);
        }
        self
    }

    pub fn transition_backoff(&self) -> Duration {
        Duration::from_secs(self.transition_backoff_secs)
    }

    pub fn update_backoff(&self) -> Duration {
        Duration::from_secs(self.update_backoff_secs)
    }
}

/// Bring `json` from `from_version` up to [`CURRENT_VERSION`].
///
/// Version 1 is the first released shape, so an unversioned file only
/// needs stamping.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, ProvisionerError> {
    if from_version > CURRENT_VERSION {
        return Err(ProvisionerError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| ProvisionerError::Config("config is not a JSON object".into()))?;
    obj.insert(
        "config_version".to_string(),
        serde_json::Value::Number(CURRENT_VERSION.into()),
    );

    Ok(json)
}

/// Build an `SdkConfig` from the region and profile, falling back to the
/// default provider chain for anything unset.
pub async fn build_aws_config(config: &SyncConfig) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        builder = builder.region(aws_config::Region::new(region.clone()));
    }
    if let Some(profile) = &config.profile {
        builder = builder.profile_name(profile);
    }

    builder.load().await
}
