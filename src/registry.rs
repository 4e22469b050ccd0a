//! Definition registry.
//!
//! Holds the canonical definition of every named type met during a generation
//! session, the set of names already handed out, and the queue of struct types
//! whose fields still have to be expanded.

use crate::schema::{SchemaObj, REF_DEFINITION_PREFIX};
use crate::types::{Kind, TypeDef, TypeKey};
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    /// Canonical store
    definitions: HashMap<TypeKey, SchemaObj>,
    /// Every name ever handed out, including renamed ones
    names: HashSet<String>,
    /// Types waiting for field expansion
    queue: VecDeque<TypeDef>,
    queued: HashSet<TypeKey>,
    /// Keys registered since the last checkpoint
    added: Vec<TypeKey>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the definition of `ty`. A pointer without its own entry shares the
    /// definition of the type it points to.
    pub fn lookup(&self, ty: &TypeDef) -> Option<&SchemaObj> {
        if let Some(definition) = self.definitions.get(&ty.key()) {
            return Some(definition);
        }
        match ty.kind() {
            Kind::Pointer(inner) => self.definitions.get(&inner.key()),
            _ => None,
        }
    }

    pub fn contains(&self, ty: &TypeDef) -> bool {
        self.definitions.contains_key(&ty.key())
    }

    /// Registers `definition` for `ty` and returns the name it is stored under.
    ///
    /// Anonymous definitions are never registered (`None`). A type that is already
    /// present keeps its existing definition. A name already taken by another type
    /// is replaced by `<Name>Type<N>` with the smallest free `N >= 2`.
    pub fn add(&mut self, ty: &TypeDef, mut definition: SchemaObj) -> Option<String> {
        if definition.type_name.is_empty() {
            return None;
        }

        let key = ty.key();
        if let Some(existing) = self.definitions.get(&key) {
            return Some(existing.type_name.clone());
        }

        if self.names.contains(&definition.type_name) {
            let base = definition.type_name.clone();
            let mut index = 2;
            let renamed = loop {
                let candidate = format!("{}Type{}", base, index);
                if !self.names.contains(&candidate) {
                    break candidate;
                }
                index += 1;
            };
            debug!("Definition name {} is taken, registering {} as {}", base, key, renamed);

            definition.type_name = renamed;
            if !definition.reference.is_empty() {
                definition.reference = format!("{}{}", REF_DEFINITION_PREFIX, definition.type_name);
            }
        }

        let name = definition.type_name.clone();
        self.names.insert(name.clone());
        self.added.push(key.clone());
        self.definitions.insert(key, definition);
        Some(name)
    }

    pub fn get_mut(&mut self, ty: &TypeDef) -> Option<&mut SchemaObj> {
        self.definitions.get_mut(&ty.key())
    }

    /// Drops the definition of `ty`. Its name stays reserved.
    pub fn remove(&mut self, ty: &TypeDef) -> Option<SchemaObj> {
        self.definitions.remove(&ty.key())
    }

    /// Queues `ty` for field expansion unless it is already waiting
    pub fn enqueue(&mut self, ty: &TypeDef) {
        if self.queued.insert(ty.key()) {
            self.queue.push_back(ty.clone());
        }
    }

    pub fn in_queue(&self, ty: &TypeDef) -> bool {
        self.queued.contains(&ty.key())
    }

    /// Takes the next type waiting for expansion
    pub fn pop(&mut self) -> Option<TypeDef> {
        let ty = self.queue.pop_front()?;
        self.queued.remove(&ty.key());
        Some(ty)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Starts a new unit of registration. Everything registered before stays put
    /// on [`DefinitionRegistry::rollback`].
    pub fn checkpoint(&mut self) {
        self.added.clear();
    }

    /// Removes every definition registered since the last checkpoint, finished or
    /// still pending, and empties the queue. The names stay reserved.
    pub fn rollback(&mut self) {
        self.queue.clear();
        self.queued.clear();
        for key in self.added.drain(..) {
            debug!("Discarding definition {}", key);
            self.definitions.remove(&key);
        }
    }

    /// Canonical definitions keyed by their final name
    pub fn definitions(&self) -> BTreeMap<String, SchemaObj> {
        self.definitions
            .values()
            .map(|definition| (definition.type_name.clone(), definition.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Forgets every definition, name and pending type
    pub fn reset(&mut self) {
        self.definitions.clear();
        self.names.clear();
        self.queue.clear();
        self.queued.clear();
        self.added.clear();
    }
}
