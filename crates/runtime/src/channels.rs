use crate::error::{CallbackError, TickError};
use crate::frame::Frame;

/// Name of the channel that always exists and receives unnamed registrations.
pub const DEFAULT_CHANNEL: &str = "__default__";

pub type FrameCallback = Box<dyn FnMut(Frame) -> Result<(), CallbackError>>;

/// Token returned by every registration.
///
/// Tokens are unique per `add`, so the same closure logic registered twice is
/// two independent entries and removing one token removes exactly one entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subscription(pub u64);

struct Entry {
    subscription: Subscription,
    callback: FrameCallback,
}

struct Channel {
    name: String,
    entries: Vec<Entry>,
}

/// Named groups of per-frame callbacks.
///
/// Channels keep creation order (the default channel is always first) and
/// callbacks keep insertion order within a channel. Channels are created lazily
/// and survive being emptied.
pub struct ChannelRegistry {
    next_id: u64,
    channels: Vec<Channel>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self {
            next_id: 0,
            channels: vec![Channel {
                name: DEFAULT_CHANNEL.to_string(),
                entries: Vec::new(),
            }],
        }
    }
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for ch in &self.channels {
            map.entry(&ch.name, &ch.entries.len());
        }
        map.finish()
    }
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` on the default channel.
    pub fn add<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(Frame) -> Result<(), CallbackError> + 'static,
    {
        self.add_to(DEFAULT_CHANNEL, callback)
    }

    /// Registers `callback` on `channel`, creating the channel if needed.
    pub fn add_to<F>(&mut self, channel: &str, callback: F) -> Subscription
    where
        F: FnMut(Frame) -> Result<(), CallbackError> + 'static,
    {
        let subscription = Subscription(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let idx = match self.position(channel) {
            Some(idx) => idx,
            None => {
                self.channels.push(Channel {
                    name: channel.to_string(),
                    entries: Vec::new(),
                });
                self.channels.len() - 1
            }
        };
        self.channels[idx].entries.push(Entry {
            subscription,
            callback: Box::new(callback),
        });
        subscription
    }

    /// Removes `subscription` from the default channel only.
    pub fn remove(&mut self, subscription: Subscription) -> bool {
        self.remove_from(DEFAULT_CHANNEL, subscription)
    }

    /// Removes `subscription` from `channel` only.
    pub fn remove_from(&mut self, channel: &str, subscription: Subscription) -> bool {
        let Some(idx) = self.position(channel) else {
            return false;
        };
        let entries = &mut self.channels[idx].entries;
        match entries.iter().position(|e| e.subscription == subscription) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Empties `channel`. The channel itself keeps existing (and keeps its
    /// position in the tick order).
    pub fn clear_channel(&mut self, channel: &str) {
        match self.position(channel) {
            Some(idx) => self.channels[idx].entries.clear(),
            None => self.channels.push(Channel {
                name: channel.to_string(),
                entries: Vec::new(),
            }),
        }
    }

    /// Session teardown: drops every callback in every channel.
    pub fn clear_all(&mut self) {
        for ch in &mut self.channels {
            ch.entries.clear();
        }
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        self.position(channel).is_some()
    }

    pub fn channel_len(&self, channel: &str) -> usize {
        self.position(channel)
            .map(|idx| self.channels[idx].entries.len())
            .unwrap_or(0)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Total number of live callbacks.
    pub fn len(&self) -> usize {
        self.channels.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every callback once. The first failure aborts the tick and is
    /// returned; callbacks after it do not run this frame.
    pub fn tick(&mut self, frame: Frame) -> Result<(), TickError> {
        for ch in &mut self.channels {
            for entry in &mut ch.entries {
                (entry.callback)(frame).map_err(|error| TickError {
                    frame_index: frame.index,
                    channel: ch.name.clone(),
                    subscription: entry.subscription,
                    error,
                })?;
            }
        }
        Ok(())
    }

    /// Runs every callback once regardless of failures and returns all of them.
    pub fn tick_isolated(&mut self, frame: Frame) -> Vec<TickError> {
        let mut failures = Vec::new();
        for ch in &mut self.channels {
            for entry in &mut ch.entries {
                if let Err(error) = (entry.callback)(frame) {
                    failures.push(TickError {
                        frame_index: frame.index,
                        channel: ch.name.clone(),
                        subscription: entry.subscription,
                        error,
                    });
                }
            }
        }
        failures
    }

    fn position(&self, channel: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.name == channel)
    }
}
