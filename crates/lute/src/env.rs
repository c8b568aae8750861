//! Environment chains for variable resolution.
//!
//! Environments form a parent-linked chain: lookups and assignments walk
//! from the innermost scope outward, while `define` always writes into the
//! innermost scope. Instead of raw parent pointers, all environments live
//! in a central arena and refer to their parent by `EnvId`; frames are
//! pushed and released in LIFO order matching call and block structure, and
//! released slots are recycled through a free list so call-heavy programs
//! do not grow the arena unboundedly.

use ahash::AHashMap;

use crate::{intern::StrId, value::Value};

/// Handle to an environment stored in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnvId(u32);

impl EnvId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("environment arena overflow"))
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The global environment is always slot 0.
pub(crate) const GLOBAL_ENV: EnvId = EnvId(0);

/// One scope: its bindings and an optional parent.
#[derive(Debug, Default)]
struct Environment {
    values: AHashMap<StrId, Value>,
    parent: Option<EnvId>,
}

/// Arena storage for all environments during a run.
#[derive(Debug)]
pub(crate) struct Environments {
    stack: Vec<Environment>,
    /// Released slots available for reuse.
    reuse_ids: Vec<EnvId>,
}

impl Environments {
    /// Creates the arena with the global environment at slot 0.
    pub fn new() -> Self {
        Self {
            stack: vec![Environment::default()],
            reuse_ids: Vec::new(),
        }
    }

    /// Acquires a child environment of `parent`, reusing a released slot
    /// when one is available.
    pub fn push(&mut self, parent: EnvId) -> EnvId {
        if let Some(id) = self.reuse_ids.pop() {
            self.stack[id.index()].parent = Some(parent);
            id
        } else {
            let id = EnvId::new(self.stack.len());
            self.stack.push(Environment {
                values: AHashMap::new(),
                parent: Some(parent),
            });
            id
        }
    }

    /// Releases an environment, clearing its bindings and recycling the
    /// slot. Every acquisition must be paired with a release on all exit
    /// paths — normal completion, return, and runtime error alike.
    ///
    /// # Panics
    /// Panics when asked to release the global environment.
    pub fn release(&mut self, id: EnvId) {
        assert_ne!(id, GLOBAL_ENV, "the global environment is never released");
        let env = &mut self.stack[id.index()];
        env.values.clear();
        env.parent = None;
        self.reuse_ids.push(id);
    }

    /// Binds `name` in `env` unconditionally; redefinition overwrites.
    pub fn define(&mut self, env: EnvId, name: StrId, value: Value) {
        self.stack[env.index()].values.insert(name, value);
    }

    /// Reads `name`, walking the chain from `env` outward.
    pub fn get(&self, env: EnvId, name: StrId) -> Option<Value> {
        let mut current = Some(env);
        while let Some(id) = current {
            let scope = &self.stack[id.index()];
            if let Some(value) = scope.values.get(&name) {
                return Some(*value);
            }
            current = scope.parent;
        }
        None
    }

    /// Writes `name` into the first enclosing scope that contains it.
    /// Returns `false` — and creates no binding — when no scope does.
    pub fn assign(&mut self, env: EnvId, name: StrId, value: Value) -> bool {
        let mut current = Some(env);
        while let Some(id) = current {
            let scope = &mut self.stack[id.index()];
            if let Some(slot) = scope.values.get_mut(&name) {
                *slot = value;
                return true;
            }
            current = scope.parent;
        }
        false
    }
}
