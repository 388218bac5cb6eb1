use foundation::{Arena, Handle};
use formats::FlywireSpec;
use runtime::{ChannelRegistry, Subscription};
use tracing::debug;

use super::error::FlylineError;
use super::sampler::FlylineSampler;
use super::sink::{SharedLine, shared_line};
use crate::layer::{Layer, LayerId, LayerKind};

/// One drawn path: its registrations and the lines they write into.
#[derive(Debug)]
pub struct FlylineEntry {
    pub name: String,
    subscriptions: Vec<Subscription>,
    lines: Vec<SharedLine>,
}

impl FlylineEntry {
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn lines(&self) -> &[SharedLine] {
        &self.lines
    }
}

/// Animated flylines bound to one registry channel.
#[derive(Debug)]
pub struct FlylineLayer {
    id: LayerId,
    channel: String,
    entries: Arena<FlylineEntry>,
}

impl FlylineLayer {
    pub fn new(id: u64, channel: impl Into<String>) -> Self {
        Self {
            id: LayerId(id),
            channel: channel.into(),
            entries: Arena::new(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn draw(
        &mut self,
        registry: &mut ChannelRegistry,
        name: &str,
        spec: &FlywireSpec,
    ) -> Result<Handle, FlylineError> {
        let sampler = FlylineSampler::new(spec)?;
        Ok(self.attach(registry, name, &sampler))
    }

    /// Replaces everything on this layer's channel with `paths`.
    ///
    /// All specs are validated before anything is cleared, so a bad preset
    /// leaves the running animation untouched.
    pub fn draw_mode(
        &mut self,
        registry: &mut ChannelRegistry,
        paths: &[(String, FlywireSpec)],
    ) -> Result<Vec<Handle>, FlylineError> {
        let samplers = paths
            .iter()
            .map(|(_, spec)| FlylineSampler::new(spec))
            .collect::<Result<Vec<_>, _>>()?;

        self.clear(registry);
        let handles = paths
            .iter()
            .zip(&samplers)
            .map(|((name, _), sampler)| self.attach(registry, name, sampler))
            .collect();
        debug!(channel = %self.channel, paths = paths.len(), "drew flyline mode");
        Ok(handles)
    }

    fn attach(
        &mut self,
        registry: &mut ChannelRegistry,
        name: &str,
        sampler: &FlylineSampler,
    ) -> Handle {
        let lines: Vec<SharedLine> = (0..sampler.repeat()).map(|_| shared_line()).collect();
        let subscriptions = sampler.register(registry, &self.channel, |k| lines[k].clone());
        self.entries.alloc(FlylineEntry {
            name: name.to_string(),
            subscriptions,
            lines,
        })
    }

    /// Unregisters one path. Stale handles return `false`.
    pub fn remove(&mut self, registry: &mut ChannelRegistry, handle: Handle) -> bool {
        let Some(entry) = self.entries.remove(handle) else {
            return false;
        };
        for subscription in entry.subscriptions {
            registry.remove_from(&self.channel, subscription);
        }
        true
    }

    /// Empties the channel and drops every line.
    pub fn clear(&mut self, registry: &mut ChannelRegistry) {
        registry.clear_channel(&self.channel);
        self.entries.clear();
    }

    pub fn entry(&self, handle: Handle) -> Option<&FlylineEntry> {
        self.entries.get(handle)
    }

    pub fn lines(&self, handle: Handle) -> Option<&[SharedLine]> {
        self.entries.get(handle).map(|e| e.lines())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &FlylineEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Layer for FlylineLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Flyline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::FlylinePresets;
    use runtime::{CallbackError, Frame};
    use std::cell::Cell;
    use std::rc::Rc;

    fn presets() -> FlylinePresets {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../formats/assets/flow_presets.json");
        let payload = std::fs::read_to_string(path).expect("read presets");
        FlylinePresets::from_json_str(&payload).expect("parse presets")
    }

    fn segment(length: f64) -> FlywireSpec {
        FlywireSpec::new(vec![[0.0, 0.0], [10.0, 0.0]], length, 2.0).with_total_points(50)
    }

    #[test]
    fn draw_and_remove_one_path() {
        let mut registry = ChannelRegistry::new();
        let mut layer = FlylineLayer::new(1, "flywire");
        let a = layer.draw(&mut registry, "a", &segment(10.0).with_repeat(2)).unwrap();
        let b = layer.draw(&mut registry, "b", &segment(5.0)).unwrap();
        assert_eq!(registry.channel_len("flywire"), 3);
        assert_eq!(layer.lines(a).map(|l| l.len()), Some(2));

        for i in 0..10 {
            registry.tick(Frame::fixed(i, 0.1)).unwrap();
        }
        assert!(layer.lines(b).unwrap()[0].borrow().revision() == 10);

        assert!(layer.remove(&mut registry, a));
        assert!(!layer.remove(&mut registry, a));
        assert_eq!(registry.channel_len("flywire"), 1);
        assert_eq!(layer.len(), 1);
        assert!(layer.entry(a).is_none());
    }

    #[test]
    fn draw_mode_replaces_previous_mode() {
        let presets = presets();
        let mut registry = ChannelRegistry::new();
        let mut layer = FlylineLayer::new(2, "flywire");

        let transport = presets.mode("transport").unwrap();
        let handles = layer.draw_mode(&mut registry, &transport).unwrap();
        assert_eq!(handles.len(), transport.len());
        let expected: usize = transport.iter().map(|(_, s)| s.repeat).sum();
        assert_eq!(registry.channel_len("flywire"), expected);

        let shutdown = presets.mode("shutdown").unwrap();
        assert!(layer.draw_mode(&mut registry, &shutdown).unwrap().is_empty());
        assert!(layer.is_empty());
        assert_eq!(registry.channel_len("flywire"), 0);
        assert!(registry.has_channel("flywire"));
        assert!(handles.iter().all(|h| layer.entry(*h).is_none()));
    }

    #[test]
    fn invalid_mode_keeps_running_animation() {
        let mut registry = ChannelRegistry::new();
        let mut layer = FlylineLayer::new(3, "flywire");
        layer.draw(&mut registry, "ok", &segment(5.0)).unwrap();

        let broken = vec![
            ("fine".to_string(), segment(5.0)),
            ("bad".to_string(), FlywireSpec::new(vec![[0.0, 0.0]], 5.0, 1.0)),
        ];
        let err = layer.draw_mode(&mut registry, &broken).unwrap_err();
        assert_eq!(err, FlylineError::TooFewWaypoints { got: 1 });
        assert_eq!(layer.len(), 1);
        assert_eq!(registry.channel_len("flywire"), 1);
    }

    #[test]
    fn clearing_the_layer_leaves_other_channels_running() {
        let mut registry = ChannelRegistry::new();
        let mut guns = FlylineLayer::new(4, "gun");
        guns.draw(&mut registry, "gun", &segment(5.0)).unwrap();

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        registry.add(move |_| -> Result<(), CallbackError> {
            counter.set(counter.get() + 1);
            Ok(())
        });

        guns.clear(&mut registry);
        registry.tick(Frame::fixed(0, 0.1)).unwrap();
        assert_eq!(fired.get(), 1);
        assert_eq!(registry.channel_len("gun"), 0);
        assert_eq!(guns.kind(), LayerKind::Flyline);
    }
}
