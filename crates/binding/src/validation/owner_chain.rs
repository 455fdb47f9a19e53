use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::validatable::{TargetHandle, Validatable};

/// Object exposing named validation targets (a form, a sub-form)
pub trait TargetOwner {
    fn owner_name(&self) -> &str;

    fn find_target(&self, name: &str) -> Option<TargetHandle>;

    /// Names of all exposed targets, in registration order
    fn target_names(&self) -> Vec<String>;
}

/// Targets of one form, registered explicitly by name
#[derive(Default)]
pub struct FormTargets {
    name: String,
    targets: HashMap<String, TargetHandle>,
    order: Vec<String>,
}

impl FormTargets {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a target under its own name. A repeated name replaces the
    /// previous target.
    pub fn register(&mut self, target: TargetHandle) -> TargetHandle {
        let name = target.borrow().name().to_string();
        let previous = self.targets.insert(name.clone(), Rc::clone(&target));
        if previous.is_none() {
            self.order.push(name);
        }
        target
    }

    pub fn with(mut self, target: Validatable) -> Self {
        self.register(target.into_handle());
        self
    }

    pub fn get(&self, name: &str) -> Option<TargetHandle> {
        self.targets.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_owner(self) -> Rc<dyn TargetOwner> {
        Rc::new(self)
    }
}

impl TargetOwner for FormTargets {
    fn owner_name(&self) -> &str {
        &self.name
    }

    fn find_target(&self, name: &str) -> Option<TargetHandle> {
        self.get(name)
    }

    fn target_names(&self) -> Vec<String> {
        self.order.clone()
    }
}

impl fmt::Debug for FormTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormTargets")
            .field("name", &self.name)
            .field("targets", &self.order)
            .finish()
    }
}

/// Ordered list of owners searched in turn to resolve a target name
#[derive(Clone, Default)]
pub struct OwnerChain {
    owners: Vec<Rc<dyn TargetOwner>>,
}

impl OwnerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, owner: Rc<dyn TargetOwner>) -> Self {
        self.owners.push(owner);
        self
    }

    pub fn push(&mut self, owner: Rc<dyn TargetOwner>) {
        self.owners.push(owner);
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// First owner exposing `name` wins
    pub fn resolve(&self, name: &str) -> Option<TargetHandle> {
        self.resolve_with_owner(name).map(|(_, target)| target)
    }

    pub fn resolve_with_owner(&self, name: &str) -> Option<(String, TargetHandle)> {
        self.owners.iter().find_map(|owner| {
            owner
                .find_target(name)
                .map(|target| (owner.owner_name().to_string(), target))
        })
    }

    /// All currently invalid targets with their messages. A target exposed
    /// by several owners is listed once.
    pub fn invalid_targets(&self) -> Vec<(String, String)> {
        let mut seen: Vec<TargetHandle> = Vec::new();
        let mut invalid = Vec::new();

        for owner in &self.owners {
            for name in owner.target_names() {
                let Some(target) = owner.find_target(&name) else {
                    continue;
                };
                if seen.iter().any(|t| Rc::ptr_eq(t, &target)) {
                    continue;
                }
                let state = target.borrow();
                if !state.is_valid() {
                    invalid.push((
                        state.name().to_string(),
                        state.error_message().to_string(),
                    ));
                }
                drop(state);
                seen.push(target);
            }
        }

        invalid
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_targets().is_empty()
    }
}

impl fmt::Debug for OwnerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.owners.iter().map(|o| o.owner_name().to_string()))
            .finish()
    }
}
