//! Parser function registry.
//!
//! Maps each parser function name to its parameter spec and handler. The
//! host looks functions up here by the name written after `{{#`.

use tracing::debug;

use crate::expander::Expander;
use crate::functions::{count, dedupe, filter, find, join, map, merge, select, sort, text};
use crate::params::{ParamSpec, Parameters};

/// A parser function body.
pub type Handler = fn(&Parameters<'_>) -> String;

/// One registered parser function.
#[derive(Clone, Copy)]
pub struct FunctionDef {
    pub name: &'static str,
    pub spec: ParamSpec,
    pub handler: Handler,
}

impl FunctionDef {
    const fn new(name: &'static str, spec: ParamSpec, handler: Handler) -> Self {
        Self {
            name,
            spec,
            handler,
        }
    }

    /// Arrange `args` and run the handler.
    pub fn call(&self, args: &[String], expander: &dyn Expander) -> String {
        (self.handler)(&Parameters::arrange(self.spec, args, expander))
    }
}

const BUILTINS: &[FunctionDef] = &[
    FunctionDef::new("if", text::IF, text::if_),
    FunctionDef::new("ifeq", text::IFEQ, text::ifeq),
    FunctionDef::new("uc", text::CASE, text::uc),
    FunctionDef::new("lc", text::CASE, text::lc),
    FunctionDef::new("esc", text::CODEC, text::esc),
    FunctionDef::new("uesc", text::CODEC, text::uesc),
    FunctionDef::new("lstcnt", count::LSTCNT, count::lstcnt),
    FunctionDef::new("lstsep", join::LSTSEP, join::lstsep),
    FunctionDef::new("lstelem", select::LSTELEM, select::lstelem),
    FunctionDef::new("lstsub", select::LSTSUB, select::lstsub),
    FunctionDef::new("lstfnd", find::LSTFND, find::lstfnd),
    FunctionDef::new("lstind", find::LSTIND, find::lstind),
    FunctionDef::new("lstapp", join::LSTAPP, join::lstapp),
    FunctionDef::new("lstprep", join::LSTPREP, join::lstprep),
    FunctionDef::new("lstjoin", join::LSTJOIN, join::lstjoin),
    FunctionDef::new("lstcntuniq", count::LSTCNTUNIQ, count::lstcntuniq),
    FunctionDef::new("lstuniq", dedupe::LSTUNIQ, dedupe::lstuniq),
    FunctionDef::new("listunique", dedupe::LISTUNIQUE, dedupe::listunique),
    FunctionDef::new("lstfltr", filter::LSTFLTR, filter::lstfltr),
    FunctionDef::new("lstrm", filter::LSTRM, filter::lstrm),
    FunctionDef::new("listfilter", filter::LISTFILTER, filter::listfilter),
    FunctionDef::new("lstsrt", sort::LSTSRT, sort::lstsrt),
    FunctionDef::new("listsort", sort::LISTSORT, sort::listsort),
    FunctionDef::new("lstmap", map::LSTMAP, map::lstmap),
    FunctionDef::new("lstmaptemp", map::LSTMAPTEMP, map::lstmaptemp),
    FunctionDef::new("listmap", map::LISTMAP, map::listmap),
    FunctionDef::new("listmerge", merge::LISTMERGE, merge::listmerge),
];

/// The set of callable parser functions.
#[derive(Clone)]
pub struct Registry {
    functions: Vec<FunctionDef>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// A registry holding every built-in function.
    pub fn with_builtins() -> Self {
        Self {
            functions: BUILTINS.to_vec(),
        }
    }

    /// Register a function, replacing any function of the same name.
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.retain(|f| f.name != def.name);
        self.functions.push(def);
    }

    /// Look a function up by name. Names are matched ignoring case.
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        let name = name.trim();
        self.functions
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Call a function by name, or return `None` if it is not registered.
    pub fn call(&self, name: &str, args: &[String], expander: &dyn Expander) -> Option<String> {
        let def = self.get(name)?;
        debug!(function = def.name, args = args.len(), "dispatch");
        Some(def.call(args, expander))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.iter().map(|f| f.name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
