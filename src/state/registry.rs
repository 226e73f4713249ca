//! Name-to-actor registry.
//!
//! The `ChannelRegistry` maps lowercase channel names to running actors.
//! Built-in channels are spawned up front and live as long as the registry;
//! custom channels are spawned by the first join and retire themselves
//! when they drain.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use channeld_proto::ServerMessage;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::config::{CatalogEntry, Config, LimitsConfig};
use crate::error::{ChannelError, ChannelResult};
use crate::security::SpeechThrottle;
use crate::services::{Collaborators, PlayerInfo};
use crate::state::actor::{ChannelActor, ChannelMap};
use crate::state::catalog::default_catalog;
use crate::state::channel::{
    Channel, ChannelCommand, ChannelContext, ChannelSnapshot, Outcome, Report,
};
use crate::state::handle::ChannelHandle;
use crate::state::policy::PermissionPolicy;

/// Joins that race a draining actor are retried this many times.
const JOIN_ATTEMPTS: usize = 5;

/// Every live channel, indexed by lowercase name.
pub struct ChannelRegistry {
    channels: Arc<ChannelMap>,
    context: ChannelContext,
    catalog: HashMap<String, CatalogEntry>,
    limits: LimitsConfig,
    next_instance: AtomicU64,
}

impl ChannelRegistry {
    /// Build the registry and spawn the built-in channels.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &Config, services: Collaborators) -> Self {
        let context = ChannelContext {
            policy: Arc::new(PermissionPolicy::from_config(&config.channels)),
            services,
            throttle: Arc::new(SpeechThrottle::new(&config.security.rate_limits)),
        };

        let entries = if config.catalog.is_empty() {
            default_catalog()
        } else {
            config.catalog.clone()
        };
        let catalog: HashMap<_, _> = entries
            .into_iter()
            .map(|entry| (entry.name.to_lowercase(), entry))
            .collect();

        let registry = Self {
            channels: Arc::new(DashMap::new()),
            context,
            catalog,
            limits: config.limits.clone(),
            next_instance: AtomicU64::new(1),
        };

        for (key, entry) in &registry.catalog {
            let channel = Channel::builtin(entry, registry.context.clone());
            let handle = registry.spawn(channel, key.clone());
            registry.channels.insert(key.clone(), handle);
        }
        info!(builtin = registry.catalog.len(), "channel registry ready");

        registry
    }

    /// Shared policy every channel consults.
    pub fn policy(&self) -> &PermissionPolicy {
        &self.context.policy
    }

    /// The speech throttle shared by every channel.
    pub fn throttle(&self) -> Arc<SpeechThrottle> {
        Arc::clone(&self.context.throttle)
    }

    /// Check a requested channel name.
    pub fn validate_name(&self, name: &str) -> ChannelResult<()> {
        if name.is_empty()
            || name.chars().count() > self.limits.max_channel_name_length
            || name.chars().any(char::is_control)
        {
            return Err(ChannelError::InvalidName);
        }
        Ok(())
    }

    /// Look up a live channel.
    pub fn get(&self, name: &str) -> Option<ChannelHandle> {
        self.channels
            .get(&name.to_lowercase())
            .map(|entry| entry.value().clone())
    }

    /// Get an existing channel actor or create a new one.
    pub fn get_or_create(&self, name: &str) -> ChannelHandle {
        let key = name.to_lowercase();
        self.channels
            .entry(key.clone())
            .or_insert_with(|| {
                let channel = match self.catalog.get(&key) {
                    Some(entry) => Channel::builtin(entry, self.context.clone()),
                    None => Channel::custom(name, self.context.clone()),
                };
                self.spawn(channel, key)
            })
            .value()
            .clone()
    }

    fn spawn(&self, channel: Channel, key: String) -> ChannelHandle {
        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        debug!(channel = %channel.name(), instance, "spawning channel actor");
        crate::metrics::channel_created();
        ChannelActor::spawn(
            channel,
            key,
            instance,
            Arc::downgrade(&self.channels),
            self.limits.mailbox_capacity,
        )
    }

    /// Join `name`, creating the channel when needed.
    pub async fn join(
        &self,
        actor: &PlayerInfo,
        name: &str,
        password: Option<&str>,
    ) -> ChannelResult<Outcome> {
        if let Err(err) = self.validate_name(name) {
            debug!(actor = %actor.id, channel = %name, "join refused: invalid name");
            self.notify(actor, name, &err);
            return Err(err);
        }

        for _ in 0..JOIN_ATTEMPTS {
            let handle = self.get_or_create(name);
            let command = ChannelCommand::Join {
                password: password.map(str::to_string),
            };
            match handle.execute(actor.clone(), command).await {
                Err(ChannelError::Draining) => {
                    debug!(channel = %name, instance = handle.instance(), "join raced a draining channel");
                }
                other => return other,
            }
        }

        // The channel kept closing under us; tell the actor to retry later
        warn!(actor = %actor.id, channel = %name, "join gave up after repeated drains");
        let err = ChannelError::Throttled;
        self.notify(actor, name, &err);
        Err(err)
    }

    /// Route a command to `name`.
    ///
    /// Joins may create the channel. Anything else addressed to a channel
    /// that does not exist is answered as if the actor were not a member.
    pub async fn execute(
        &self,
        actor: &PlayerInfo,
        name: &str,
        command: ChannelCommand,
    ) -> ChannelResult<Outcome> {
        if let ChannelCommand::Join { password } = &command {
            return self.join(actor, name, password.as_deref()).await;
        }

        let report = command.failure_report();
        let result = match self.get(name) {
            Some(handle) => handle.execute(actor.clone(), command).await,
            None => Err(ChannelError::Draining),
        };

        match result {
            Err(ChannelError::Draining) => {
                let err = ChannelError::NotMember;
                if report == Report::Notify {
                    self.notify(actor, name, &err);
                }
                Err(err)
            }
            other => other,
        }
    }

    /// Administrative static/dynamic conversion. Unknown or draining
    /// channels report no change.
    pub async fn set_static(&self, name: &str, want_static: bool) -> bool {
        match self.get(name) {
            Some(handle) => handle.set_static(want_static).await.unwrap_or(false),
            None => false,
        }
    }

    pub async fn snapshot(&self, name: &str) -> Option<ChannelSnapshot> {
        self.get(name)?.snapshot().await.ok()
    }

    /// Leave every channel quietly, as on logout. Returns how many
    /// channels the player was removed from.
    pub async fn part_all(&self, actor: &PlayerInfo) -> usize {
        let handles: Vec<ChannelHandle> = self
            .channels
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut left = 0;
        for handle in handles {
            if handle
                .execute(actor.clone(), ChannelCommand::Leave { notify: false })
                .await
                .is_ok()
            {
                left += 1;
            }
        }
        self.context.throttle.forget(actor.id);
        left
    }

    /// Number of live channels, built-ins included.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Display names of live channels, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .channels
            .iter()
            .map(|entry| entry.value().name().to_string())
            .collect();
        names.sort_unstable();
        names
    }

    fn notify(&self, actor: &PlayerInfo, channel: &str, err: &ChannelError) {
        if let Some(notice) = err.to_notification(channel) {
            self.context
                .services
                .transport
                .deliver(actor.id, Arc::new(ServerMessage::from(notice)));
        }
    }
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("channels", &self.channels.len())
            .field("builtin", &self.catalog.len())
            .finish_non_exhaustive()
    }
}
