//! A small markup host.
//!
//! Expands parser function calls through the [`Registry`], template calls
//! from a table of template bodies, and argument references against the
//! template frame being expanded. It is enough to run list functions from
//! the command line and in tests.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::config::{Config, DEFAULT_MAX_DEPTH};
use crate::expander::{Expander, TemplateCall};
use crate::markup::{self, Argument, Call, Node};
use crate::registry::Registry;

/// Rendered in place of a template call nested too deeply.
pub const DEPTH_ERROR: &str = "<strong class=\"error\">Expansion depth limit exceeded</strong>";

/// Limit on markup expanded inside markup, template bodies included. Text
/// nested deeper than this is left as it is.
pub const MAX_NESTING: usize = 100;

/// Canonical form of a template name: trimmed, underscores read as spaces,
/// first letter upper case.
pub fn normalize_name(name: &str) -> String {
    let name = name.trim().replace('_', " ");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a raw template argument at its first `=`, unless that `=` comes
/// after the start of a nested construct.
fn split_named(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.split_once('=')?;
    if key.contains(['{', '[']) {
        None
    } else {
        Some((key, value))
    }
}

pub struct Host {
    templates: HashMap<String, String>,
    registry: Registry,
    max_depth: usize,
}

impl Host {
    /// A host with the built-in functions and no templates.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            registry: Registry::with_builtins(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A host with the built-in functions and the configured templates.
    pub fn from_config(config: Config) -> Self {
        let mut host = Self::new().with_max_depth(config.max_depth);
        host.add_templates(config.templates);
        host
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Add or replace a template.
    pub fn with_template(mut self, name: &str, body: impl Into<String>) -> Self {
        self.templates.insert(normalize_name(name), body.into());
        self
    }

    fn add_templates(&mut self, templates: BTreeMap<String, String>) {
        for (name, body) in templates {
            self.templates.insert(normalize_name(&name), body);
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Expand markup outside any template.
    pub fn render(&self, text: &str) -> String {
        Frame::root(self).expand(text)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments bound for one template expansion, by name. Positional
/// arguments are bound under their number.
type Bindings = HashMap<String, String>;

/// The expansion state of one template, or of the top level.
struct Frame<'a> {
    host: &'a Host,
    args: Option<&'a Bindings>,
    depth: usize,
    /// Expansions in progress, counted across template frames.
    nesting: Cell<usize>,
}

impl<'a> Frame<'a> {
    fn root(host: &'a Host) -> Self {
        Self {
            host,
            args: None,
            depth: 0,
            nesting: Cell::new(0),
        }
    }

    fn expand_node(&self, node: &Node<'_>, out: &mut String) {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Argument(arg) => out.push_str(&self.expand_argument(arg)),
            Node::Call(call) => out.push_str(&self.expand_call(call)),
        }
    }

    fn expand_argument(&self, arg: &Argument<'_>) -> String {
        let Some(args) = self.args else {
            return arg.raw.to_string();
        };
        let name = self.expand(arg.name);
        match (args.get(name.trim()), arg.default) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => self.expand(default),
            (None, None) => arg.raw.to_string(),
        }
    }

    fn expand_call(&self, call: &Call<'_>) -> String {
        if let Some((name, args)) = call.function() {
            let args: Vec<String> = args.into_iter().map(str::to_string).collect();
            return match self.host.registry.call(name, &args, self) {
                Some(result) => result,
                None => {
                    warn!(function = name, "unknown parser function");
                    call.raw.to_string()
                }
            };
        }

        let name = self.expand(call.target);
        let mut bindings = Bindings::new();
        let mut position = 0;
        for arg in &call.args {
            match split_named(arg) {
                Some((key, value)) => {
                    let key = self.expand(key).trim().to_string();
                    bindings.insert(key, self.expand(value).trim().to_string());
                }
                None => {
                    position += 1;
                    bindings
                        .entry(position.to_string())
                        .or_insert_with(|| self.expand(arg));
                }
            }
        }
        self.invoke(&name, &bindings)
    }

    /// Expand a template's body with `bindings` as its arguments.
    fn invoke(&self, name: &str, bindings: &Bindings) -> String {
        let name = normalize_name(name);
        if self.depth >= self.host.max_depth {
            warn!(template = %name, depth = self.depth, "expansion depth limit exceeded");
            return DEPTH_ERROR.to_string();
        }
        let Some(body) = self.host.templates.get(&name) else {
            warn!(template = %name, "unknown template");
            return format!("[[:Template:{}]]", name);
        };

        let frame = Frame {
            host: self.host,
            args: Some(bindings),
            depth: self.depth + 1,
            nesting: Cell::new(self.nesting.get()),
        };
        frame.expand(body)
    }
}

impl Expander for Frame<'_> {
    fn expand(&self, text: &str) -> String {
        let nesting = self.nesting.get();
        if nesting >= MAX_NESTING {
            warn!(nesting, "markup nested too deeply; leaving it unexpanded");
            return text.to_string();
        }

        self.nesting.set(nesting + 1);
        let mut out = String::with_capacity(text.len());
        for node in markup::parse(text) {
            self.expand_node(&node, &mut out);
        }
        self.nesting.set(nesting);
        out
    }

    fn call_template(&self, call: &TemplateCall) -> String {
        let mut bindings: Bindings = call
            .positional
            .iter()
            .enumerate()
            .map(|(i, value)| ((i + 1).to_string(), value.clone()))
            .collect();
        for (key, value) in &call.named {
            bindings.insert(key.clone(), value.clone());
        }
        self.invoke(&call.name, &bindings)
    }
}
