mod coerce;
mod tokenize;
mod usage;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{NclipError, Result};

pub use coerce::{ParamType, Value, coerce_args, infer_value};
pub use tokenize::tokenize;
pub use usage::{HELP_HEADER, command_usage, format_params, help_overview};

/// Command callback. `S` is the application state the handlers act on.
pub type Handler<S> = fn(&mut Context<'_, S>) -> Result<()>;

/// Everything a handler receives for one invocation.
pub struct Context<'a, S> {
    /// Primary name of the resolved command, even when invoked by alias.
    pub name: &'a str,
    pub args: Vec<Value>,
    pub registry: &'a Registry<S>,
    pub state: &'a mut S,
}

impl<S> Context<'_, S> {
    pub fn str_arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(Value::as_str)
    }
}

pub struct CommandSpec<S> {
    pub alias: Option<String>,
    pub description: String,
    pub min_args: usize,
    pub params: Vec<ParamType>,
    pub handler: Handler<S>,
}

impl<S> CommandSpec<S> {
    pub fn new(handler: Handler<S>) -> Self {
        Self {
            alias: None,
            description: String::new(),
            min_args: 0,
            params: Vec::new(),
            handler,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn min_args(mut self, min_args: usize) -> Self {
        self.min_args = min_args;
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParamType>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Arity rule: an invocation is rejected only when it is below the
    /// minimum and also differs from the declared parameter count.
    pub fn accepts_arity(&self, arg_len: usize) -> bool {
        !(arg_len < self.min_args && arg_len != self.params.len())
    }
}

struct Slot<S> {
    name: String,
    spec: CommandSpec<S>,
}

/// Name and alias table for commands.
///
/// Names and aliases are both keys into one slot table, so replacing a
/// command through its name is immediately visible through its alias.
pub struct Registry<S> {
    slots: Vec<Slot<S>>,
    names: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            names: HashMap::new(),
            aliases: HashMap::new(),
        }
    }
}

impl<S> Registry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the command stored under `name`.
    pub fn register(&mut self, name: impl Into<String>, spec: CommandSpec<S>) -> &mut Self {
        let name = name.into();
        let alias = spec.alias.clone();

        let index = match self.names.get(&name).copied() {
            Some(index) => {
                let slot = &mut self.slots[index];
                let previous = std::mem::replace(&mut slot.spec, spec);
                if let Some(old_alias) = previous.alias
                    && self.aliases.get(&old_alias) == Some(&index)
                {
                    self.aliases.remove(&old_alias);
                }
                debug!(command = %name, "replaced command");
                index
            }
            None => {
                self.slots.push(Slot {
                    name: name.clone(),
                    spec,
                });
                let index = self.slots.len() - 1;
                self.names.insert(name.clone(), index);
                index
            }
        };

        if let Some(alias) = alias {
            if self.names.contains_key(&alias) {
                warn!(command = %name, alias = %alias, "alias shadowed by a command name");
            }
            self.aliases.insert(alias, index);
        }

        self
    }

    /// Looks a token up by name first, then by alias.
    pub fn find(&self, token: &str) -> Option<(&str, &CommandSpec<S>)> {
        self.names
            .get(token)
            .or_else(|| self.aliases.get(token))
            .and_then(|index| self.slots.get(*index))
            .map(|slot| (slot.name.as_str(), &slot.spec))
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &CommandSpec<S>)> {
        self.slots
            .iter()
            .map(|slot| (slot.name.as_str(), &slot.spec))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolves `argv[0]`, validates arity, coerces the rest and runs the handler.
    pub fn exec(&self, state: &mut S, argv: &[String]) -> Result<()> {
        let (token, raw_args) = argv.split_first().ok_or(NclipError::EmptyInvocation)?;
        let (name, spec) = self
            .find(token)
            .ok_or_else(|| NclipError::CommandNotFound(token.clone()))?;

        if !spec.accepts_arity(raw_args.len()) {
            return Err(NclipError::Arity {
                expected: spec.min_args,
                actual: raw_args.len(),
            });
        }

        let args = coerce_args(&spec.params, raw_args)?;
        debug!(command = %name, args = args.len(), "dispatching");

        let mut context = Context {
            name,
            args,
            registry: self,
            state,
        };
        (spec.handler)(&mut context)
    }
}
