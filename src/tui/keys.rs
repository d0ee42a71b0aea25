//! Key-down listeners scoped to the components that register them.
//!
//! The [`KeyBus`] is the single key-down stream for the whole screen. A
//! component subscribes with a key and a handler and gets back a
//! [`Subscription`]; dropping the subscription removes the handler, so a
//! component's listeners live exactly as long as the component does.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Legacy numeric code of the Backspace key
pub const BACKSPACE: u32 = 8;

/// A key press as listeners see it: the semantic key name plus the legacy
/// numeric key code where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    pub name: String,
    pub code: Option<u32>,
    pub modifiers: KeyModifiers,
}

impl From<&KeyEvent> for KeyStroke {
    fn from(key: &KeyEvent) -> Self {
        let (name, code): (String, Option<u32>) = match key.code {
            KeyCode::Backspace => ("Backspace".into(), Some(8)),
            KeyCode::Tab | KeyCode::BackTab => ("Tab".into(), Some(9)),
            KeyCode::Enter => ("Enter".into(), Some(13)),
            KeyCode::Esc => ("Escape".into(), Some(27)),
            KeyCode::PageUp => ("PageUp".into(), Some(33)),
            KeyCode::PageDown => ("PageDown".into(), Some(34)),
            KeyCode::End => ("End".into(), Some(35)),
            KeyCode::Home => ("Home".into(), Some(36)),
            KeyCode::Left => ("ArrowLeft".into(), Some(37)),
            KeyCode::Up => ("ArrowUp".into(), Some(38)),
            KeyCode::Right => ("ArrowRight".into(), Some(39)),
            KeyCode::Down => ("ArrowDown".into(), Some(40)),
            KeyCode::Insert => ("Insert".into(), Some(45)),
            KeyCode::Delete => ("Delete".into(), Some(46)),
            KeyCode::F(n) if (1..=12).contains(&n) => (format!("F{}", n), Some(111 + n as u32)),
            KeyCode::F(n) => (format!("F{}", n), None),
            KeyCode::Char(c) => (c.to_string(), legacy_char_code(c)),
            _ => ("Unidentified".into(), None),
        };
        KeyStroke {
            name,
            code,
            modifiers: key.modifiers,
        }
    }
}

fn legacy_char_code(c: char) -> Option<u32> {
    match c {
        ' ' => Some(32),
        '0'..='9' => Some(c as u32),
        'a'..='z' | 'A'..='Z' => Some(c.to_ascii_uppercase() as u32),
        _ => None,
    }
}

/// Which key a listener fires on: a semantic name or a legacy key code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatch {
    Name(String),
    Code(u32),
}

impl KeyMatch {
    pub fn matches(&self, stroke: &KeyStroke) -> bool {
        match self {
            KeyMatch::Name(name) => stroke.name == *name,
            KeyMatch::Code(code) => stroke.code == Some(*code),
        }
    }
}

impl From<&str> for KeyMatch {
    fn from(name: &str) -> Self {
        KeyMatch::Name(name.to_string())
    }
}

impl From<u32> for KeyMatch {
    fn from(code: u32) -> Self {
        KeyMatch::Code(code)
    }
}

type Handler<C> = Rc<RefCell<dyn FnMut(&mut C, &KeyStroke)>>;

struct Registration<C> {
    id: u64,
    owner: Option<u64>,
    key: KeyMatch,
    handler: Handler<C>,
}

impl<C> Registration<C> {
    /// Unowned listeners hear every dispatch; owned ones only their owner's.
    fn hears(&self, owner: Option<u64>, stroke: &KeyStroke) -> bool {
        (self.owner.is_none() || self.owner == owner) && self.key.matches(stroke)
    }
}

struct Registry<C> {
    next_id: u64,
    entries: Vec<Registration<C>>,
}

impl<C> Registry<C> {
    fn insert(&mut self, owner: Option<u64>, key: KeyMatch, handler: Handler<C>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Registration {
            id,
            owner,
            key,
            handler,
        });
        id
    }

    /// Detach the registration. The caller drops it once the registry is no
    /// longer borrowed, since a handler may own subscriptions of its own.
    fn remove(&mut self, id: u64) -> Option<Registration<C>> {
        let pos = self.entries.iter().position(|r| r.id == id)?;
        Some(self.entries.remove(pos))
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }
}

struct Shared<C> {
    registry: RefCell<Registry<C>>,
    /// Ids whose subscription was dropped while the registry was borrowed
    pending: RefCell<Vec<u64>>,
}

impl<C> Shared<C> {
    fn remove(&self, id: u64) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                let removed = registry.remove(id);
                drop(registry);
                drop(removed);
            }
            Err(_) => self.pending.borrow_mut().push(id),
        }
    }

    /// Carry out removals deferred by [`Shared::remove`].
    fn purge(&self) {
        loop {
            let ids = std::mem::take(&mut *self.pending.borrow_mut());
            if ids.is_empty() {
                return;
            }
            let removed: Vec<Registration<C>> = {
                let mut registry = self.registry.borrow_mut();
                ids.iter().filter_map(|id| registry.remove(*id)).collect()
            };
            tracing::trace!(count = removed.len(), "deferred key listener removal");
            drop(removed);
        }
    }

    fn contains(&self, id: u64) -> bool {
        !self.pending.borrow().contains(&id) && self.registry.borrow().contains(id)
    }

    fn insert(&self, owner: Option<u64>, key: KeyMatch, handler: Handler<C>) -> u64 {
        self.purge();
        self.registry.borrow_mut().insert(owner, key, handler)
    }
}

/// The shared key-down stream. `C` is the context handed to handlers.
///
/// A listener is either unowned, and hears every key press, or owned by one
/// component, and hears only presses dispatched to that component.
pub struct KeyBus<C> {
    shared: Rc<Shared<C>>,
}

impl<C: 'static> Default for KeyBus<C> {
    fn default() -> Self {
        KeyBus {
            shared: Rc::new(Shared {
                registry: RefCell::new(Registry {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                pending: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl<C: 'static> KeyBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `key` on every dispatch. The handler stays
    /// registered until the returned subscription is dropped or unsubscribed.
    pub fn subscribe<F>(&self, key: impl Into<KeyMatch>, handler: F) -> Subscription<C>
    where
        F: FnMut(&mut C, &KeyStroke) + 'static,
    {
        self.register(None, key.into(), handler)
    }

    /// Register `handler` for `key`, heard only by [`KeyBus::dispatch_to`]
    /// with the same `owner`.
    pub fn subscribe_owned<F>(&self, owner: u64, key: impl Into<KeyMatch>, handler: F) -> Subscription<C>
    where
        F: FnMut(&mut C, &KeyStroke) + 'static,
    {
        self.register(Some(owner), key.into(), handler)
    }

    fn register<F>(&self, owner: Option<u64>, key: KeyMatch, handler: F) -> Subscription<C>
    where
        F: FnMut(&mut C, &KeyStroke) + 'static,
    {
        let handler: Handler<C> = Rc::new(RefCell::new(handler));
        let id = self.shared.insert(owner, key.clone(), handler);
        tracing::trace!(id, ?owner, ?key, "key listener added");
        Subscription {
            shared: Rc::downgrade(&self.shared),
            owner,
            id: Some(id),
        }
    }

    /// Run the unowned handlers whose key matches, in subscription order.
    /// Returns how many handlers ran.
    pub fn dispatch(&self, ctx: &mut C, stroke: &KeyStroke) -> usize {
        self.run(None, ctx, stroke)
    }

    /// Like [`KeyBus::dispatch`], plus the handlers owned by `owner`.
    pub fn dispatch_to(&self, owner: u64, ctx: &mut C, stroke: &KeyStroke) -> usize {
        self.run(Some(owner), ctx, stroke)
    }

    fn run(&self, owner: Option<u64>, ctx: &mut C, stroke: &KeyStroke) -> usize {
        self.shared.purge();
        // Snapshot first so handlers may add or drop subscriptions while running
        let matching: Vec<(u64, Handler<C>)> = self
            .shared
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|r| r.hears(owner, stroke))
            .map(|r| (r.id, Rc::clone(&r.handler)))
            .collect();

        let mut fired = 0;
        for (id, handler) in matching {
            // Removed by an earlier handler in this same dispatch
            if !self.shared.contains(id) {
                continue;
            }
            let mut f = handler.borrow_mut();
            (*f)(ctx, stroke);
            fired += 1;
        }
        fired
    }

    /// Number of registered handlers
    pub fn listener_count(&self) -> usize {
        self.shared.purge();
        self.shared.registry.borrow().entries.len()
    }
}

/// Handle to one registered listener. Dropping it unsubscribes.
pub struct Subscription<C> {
    shared: Weak<Shared<C>>,
    owner: Option<u64>,
    id: Option<u64>,
}

impl<C: 'static> Subscription<C> {
    pub fn is_active(&self) -> bool {
        match (self.id, self.shared.upgrade()) {
            (Some(id), Some(shared)) => shared.contains(id),
            _ => false,
        }
    }

    /// Swap in a new key and handler under the same owner. The old
    /// registration is removed before the new one is added, so the pair never
    /// fires twice for one key press.
    pub fn rebind<F>(&mut self, key: impl Into<KeyMatch>, handler: F)
    where
        F: FnMut(&mut C, &KeyStroke) + 'static,
    {
        self.unsubscribe();
        if let Some(shared) = self.shared.upgrade() {
            let key = key.into();
            let handler: Handler<C> = Rc::new(RefCell::new(handler));
            let id = shared.insert(self.owner, key.clone(), handler);
            tracing::trace!(id, ?key, "key listener rebound");
            self.id = Some(id);
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(id) = self.id.take()
            && let Some(shared) = self.shared.upgrade()
        {
            shared.remove(id);
            tracing::trace!(id, "key listener removed");
        }
    }
}

impl<C> Drop for Subscription<C> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take()
            && let Some(shared) = self.shared.upgrade()
        {
            shared.remove(id);
        }
    }
}
