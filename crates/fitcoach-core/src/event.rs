//! Live configuration bus.
//!
//! Settings edited while the app is running (theme, banner, background) are
//! announced on named channels so the shell can pick them up without a
//! reload.
//!
//! ## Learning: Observer Pattern on One Thread
//!
//! Handlers are plain closures kept in `Rc<RefCell<..>>`. That makes the bus
//! `!Send`, which is the point: it lives on the UI thread and delivery is a
//! direct, synchronous call.
//!
//! - Per-channel delivery order is publish order.
//! - A publish made from inside a handler is queued and delivered once the
//!   current delivery returns, instead of re-entering the bus.
//! - There is no replay: a handler only sees events published after it
//!   subscribed.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use fitcoach_style::ThemeConfig;

use crate::settings::{BackgroundSetting, BannerSetting};

/// Named live-configuration channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    ThemeChanged,
    BannerChanged,
    BackgroundChanged,
}

impl Channel {
    pub const ALL: [Channel; 3] = [
        Channel::ThemeChanged,
        Channel::BannerChanged,
        Channel::BackgroundChanged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::ThemeChanged => "themeChanged",
            Channel::BannerChanged => "bannerChanged",
            Channel::BackgroundChanged => "backgroundChanged",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A payload published on one of the channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Theme(ThemeConfig),
    Banner(BannerSetting),
    Background(BackgroundSetting),
}

impl ConfigEvent {
    pub fn channel(&self) -> Channel {
        match self {
            ConfigEvent::Theme(_) => Channel::ThemeChanged,
            ConfigEvent::Banner(_) => Channel::BannerChanged,
            ConfigEvent::Background(_) => Channel::BackgroundChanged,
        }
    }
}

type Handler = Rc<RefCell<dyn FnMut(&ConfigEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<Channel, Vec<(u64, Handler)>>,
    pending: VecDeque<ConfigEvent>,
    delivering: bool,
}

impl Registry {
    /// Detaches a handler; the caller drops it after releasing the borrow.
    fn remove(&mut self, channel: Channel, id: u64) -> Option<Handler> {
        let list = self.handlers.get_mut(&channel)?;
        let index = list.iter().position(|(handler_id, _)| *handler_id == id)?;
        Some(list.remove(index).1)
    }
}

/// In-process publish/subscribe bus for configuration changes.
///
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct LiveConfigBus {
    registry: Rc<RefCell<Registry>>,
}

impl LiveConfigBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` on `channel`.
    ///
    /// The handler stays registered until the returned guard is cancelled
    /// or dropped.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(
        &self,
        channel: Channel,
        handler: impl FnMut(&ConfigEvent) + 'static,
    ) -> SubscriptionGuard {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        let handler: Handler = Rc::new(RefCell::new(handler));
        registry
            .handlers
            .entry(channel)
            .or_default()
            .push((id, handler));

        tracing::debug!(%channel, id, "Subscribed");
        SubscriptionGuard {
            registry: Rc::downgrade(&self.registry),
            channel,
            id,
            active: true,
        }
    }

    /// Delivers `event` to every handler on its channel.
    ///
    /// Fire-and-forget: publishing with no subscribers is not an error.
    pub fn publish(&self, event: ConfigEvent) {
        {
            let mut registry = self.registry.borrow_mut();
            registry.pending.push_back(event);
            if registry.delivering {
                return;
            }
            registry.delivering = true;
        }
        let _delivering = Delivering(&self.registry);

        loop {
            let next = {
                let mut registry = self.registry.borrow_mut();
                registry.pending.pop_front().map(|event| {
                    let handlers: Vec<Handler> = registry
                        .handlers
                        .get(&event.channel())
                        .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
                        .unwrap_or_default();
                    (event, handlers)
                })
            };

            let Some((event, handlers)) = next else {
                break;
            };

            tracing::debug!(channel = %event.channel(), subscribers = handlers.len(), "Delivering");
            for handler in handlers {
                (&mut *handler.borrow_mut())(&event);
            }
        }
    }

    /// Number of handlers currently registered on `channel`.
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.registry
            .borrow()
            .handlers
            .get(&channel)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for LiveConfigBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for channel in Channel::ALL {
            map.entry(&channel.name(), &self.subscriber_count(channel));
        }
        map.finish()
    }
}

/// Clears the delivering flag when the delivery loop exits, including by
/// a panicking handler, so later publishes are not queued forever.
struct Delivering<'a>(&'a RefCell<Registry>);

impl Drop for Delivering<'_> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.0.try_borrow_mut() {
            registry.delivering = false;
        }
    }
}

/// Handle to one registration on the bus.
///
/// Dropping the guard unsubscribes. The guard holds only a weak reference,
/// so it never keeps the bus alive.
pub struct SubscriptionGuard {
    registry: Weak<RefCell<Registry>>,
    channel: Channel,
    id: u64,
    active: bool,
}

impl SubscriptionGuard {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    /// Removes the handler. Returns `false` if it was already gone.
    pub fn cancel(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.borrow_mut().remove(self.channel, self.id);
        if removed.is_some() {
            tracing::debug!(channel = %self.channel, id = self.id, "Unsubscribed");
        }
        removed.is_some()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
