//! The macro expansion port.
//!
//! List functions never expand markup themselves. Anything that has to be
//! expanded goes through an [`Expander`] handed down by the caller, so the
//! recursion between list functions and the host stays visible.

use crate::escape::unescape;

/// Expands markup within the caller's frame.
pub trait Expander {
    /// Expand markup to plain text.
    fn expand(&self, text: &str) -> String;

    /// Invoke a template and return its expanded text.
    ///
    /// The default formats the call as markup and expands it, which is only
    /// faithful when no argument contains `|`, `=` or `}}`. Hosts that can
    /// bind arguments directly should override it.
    fn call_template(&self, call: &TemplateCall) -> String {
        self.expand(&call.to_markup())
    }
}

impl<E: Expander + ?Sized> Expander for &E {
    fn expand(&self, text: &str) -> String {
        (**self).expand(text)
    }

    fn call_template(&self, call: &TemplateCall) -> String {
        (**self).call_template(call)
    }
}

/// Unescape `text`, then expand it.
pub fn evaluate_unescaped(expander: &dyn Expander, text: &str) -> String {
    expander.expand(&unescape(text))
}

/// A template invocation with already-expanded arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCall {
    pub name: String,
    /// Positional arguments, numbered from 1.
    pub positional: Vec<String>,
    pub named: Vec<(String, String)>,
}

impl TemplateCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Append positional arguments.
    pub fn with_positional<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a named argument.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    /// Format the call as markup, numbering positional arguments explicitly.
    pub fn to_markup(&self) -> String {
        let mut out = String::from("{{");
        out.push_str(&self.name);
        for (i, arg) in self.positional.iter().enumerate() {
            out.push_str(&format!("|{}={}", i + 1, arg));
        }
        for (name, value) in &self.named {
            out.push_str(&format!("|{}={}", name, value));
        }
        out.push_str("}}");
        out
    }
}

/// Returns markup unchanged. Template calls come back as their markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Expander for Verbatim {
    fn expand(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_call_markup() {
        let call = TemplateCall::new("Row")
            .with_positional(["a", "b"])
            .with_named("index", "3");
        assert_eq!(call.to_markup(), "{{Row|1=a|2=b|index=3}}");
    }

    #[test]
    fn template_call_without_arguments() {
        assert_eq!(TemplateCall::new("X").to_markup(), "{{X}}");
    }

    #[test]
    fn verbatim_call_template_returns_markup() {
        let call = TemplateCall::new("T").with_positional(["v"]);
        assert_eq!(Verbatim.call_template(&call), "{{T|1=v}}");
    }

    #[test]
    fn evaluate_unescaped_unescapes_before_expanding() {
        assert_eq!(evaluate_unescaped(&Verbatim, "a\\_\\{b"), "a {b");
    }
}
