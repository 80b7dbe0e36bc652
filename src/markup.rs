//! Markup parser.
//!
//! Splits text into literal runs, `{{...}}` calls and `{{{...}}}` argument
//! references. Call and argument parts are returned as raw source slices;
//! they are parsed again when expanded. Text inside `[[...]]` is opaque, so
//! a `|` in a link does not split a part. Constructs that are not terminated
//! are literal text, so parsing never fails.
//!
//! The text is first cut into brace runs, link brackets, pipes and plain
//! text. A single pass over those tokens then matches each run of closing
//! braces against the innermost open run, so parsing is linear in the
//! length of the text however deeply it nests.

use std::ops::Range;

use winnow::ModalResult;
use winnow::combinator::{alt, repeat};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{one_of, take_till, take_while};

/// A piece of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Text(&'a str),
    Call(Call<'a>),
    Argument(Argument<'a>),
}

/// `{{target|arg|...}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// The whole call, braces included.
    pub raw: &'a str,
    pub target: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> Call<'a> {
    /// For a parser function call `{{#name:first|...}}`, its name and
    /// arguments. The text after the colon is the first argument.
    pub fn function(&self) -> Option<(&'a str, Vec<&'a str>)> {
        let rest = self.target.trim_start().strip_prefix('#')?;
        let (name, first) = rest.split_once(':')?;
        let args = std::iter::once(first)
            .chain(self.args.iter().copied())
            .collect();
        Some((name.trim(), args))
    }
}

/// `{{{name}}}` or `{{{name|default}}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument<'a> {
    /// The whole reference, braces included.
    pub raw: &'a str,
    pub name: &'a str,
    pub default: Option<&'a str>,
}

/// Parse markup into nodes.
pub fn parse(text: &str) -> Vec<Node<'_>> {
    let Some(tokens) = tokenize(text) else {
        return vec![Node::Text(text)];
    };

    let mut matcher = Matcher::default();
    for (token, span) in tokens {
        matcher.feed(token, span);
    }

    let mut nodes = Vec::new();
    let mut pos = 0;
    for construct in matcher.found {
        if construct.start > pos {
            nodes.push(Node::Text(&text[pos..construct.start]));
        }
        pos = construct.end;
        nodes.push(construct.node(text));
    }
    if pos < text.len() {
        nodes.push(Node::Text(&text[pos..]));
    }
    nodes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A run of `{`, by length.
    Open(usize),
    /// A run of `}`, by length.
    Close(usize),
    LinkOpen,
    LinkClose,
    Pipe,
    Text,
}

type Input<'a> = LocatingSlice<&'a str>;

fn tokenize(text: &str) -> Option<Vec<(Token, Range<usize>)>> {
    repeat(0.., token).parse(LocatingSlice::new(text)).ok()
}

fn token(input: &mut Input<'_>) -> ModalResult<(Token, Range<usize>)> {
    alt((
        take_while(1.., '{').map(|run: &str| Token::Open(run.len())),
        take_while(1.., '}').map(|run: &str| Token::Close(run.len())),
        "[[".value(Token::LinkOpen),
        "]]".value(Token::LinkClose),
        '|'.value(Token::Pipe),
        take_till(1.., ('{', '}', '[', ']', '|')).value(Token::Text),
        one_of(('[', ']')).value(Token::Text),
    ))
    .with_span()
    .parse_next(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Opening braces not yet matched.
    Braces(usize),
    Link,
}

/// An open run of braces or an open link.
#[derive(Debug)]
struct Opener {
    kind: Kind,
    start: usize,
    /// Offsets of the pipes seen while this was the innermost opener.
    pipes: Vec<usize>,
}

/// A matched call or argument reference.
#[derive(Debug)]
struct Construct {
    start: usize,
    end: usize,
    /// 2 for a call, 3 for an argument reference.
    braces: usize,
    pipes: Vec<usize>,
}

impl Construct {
    fn node<'a>(mut self, text: &'a str) -> Node<'a> {
        self.pipes.sort_unstable();
        let raw = &text[self.start..self.end];
        let mut parts = Vec::with_capacity(self.pipes.len() + 1);
        let mut from = self.start + self.braces;
        for pipe in self.pipes {
            parts.push(&text[from..pipe]);
            from = pipe + 1;
        }
        parts.push(&text[from..self.end - self.braces]);

        if self.braces == 3 {
            Node::Argument(Argument {
                raw,
                name: parts[0].trim(),
                default: parts.get(1).copied(),
            })
        } else {
            Node::Call(Call {
                raw,
                target: parts[0],
                args: parts[1..].to_vec(),
            })
        }
    }
}

/// Matches brace runs and links with a stack.
#[derive(Debug, Default)]
struct Matcher {
    stack: Vec<Opener>,
    /// Number of links on the stack.
    links: usize,
    /// Outermost constructs matched so far, in order.
    found: Vec<Construct>,
}

impl Matcher {
    fn feed(&mut self, token: Token, span: Range<usize>) {
        match token {
            Token::Open(run) if run >= 2 => self.push(Kind::Braces(run), span.start),
            Token::Close(run) if run >= 2 => self.close_braces(span.start, run),
            Token::LinkOpen => {
                self.links += 1;
                self.push(Kind::Link, span.start);
            }
            Token::LinkClose => self.close_link(),
            Token::Pipe => {
                if let Some(top) = self.stack.last_mut() {
                    top.pipes.push(span.start);
                }
            }
            _ => {}
        }
    }

    fn push(&mut self, kind: Kind, start: usize) {
        self.stack.push(Opener {
            kind,
            start,
            pipes: Vec::new(),
        });
    }

    /// Close the innermost link. Brace runs opened inside it stay text.
    fn close_link(&mut self) {
        if self.links == 0 {
            return;
        }
        if let Some(index) = self.stack.iter().rposition(|o| o.kind == Kind::Link) {
            self.stack.truncate(index);
            self.links -= 1;
        }
    }

    /// Match a run of closing braces at `at`, innermost opener first.
    fn close_braces(&mut self, mut at: usize, mut run: usize) {
        while run >= 2 && self.stack.len() > self.links {
            let Some(index) = self
                .stack
                .iter()
                .rposition(|o| matches!(o.kind, Kind::Braces(_)))
            else {
                break;
            };

            // Links still open inside the construct are text; their pipes
            // split the construct's parts.
            let abandoned: Vec<Opener> = self.stack.drain(index + 1..).collect();
            self.links -= abandoned.len();
            let opener = &mut self.stack[index];
            for link in abandoned {
                opener.pipes.extend(link.pipes);
            }

            let Kind::Braces(count) = opener.kind else {
                break;
            };
            let used = if count >= 3 && run >= 3 { 3 } else { 2 };
            let remaining = count - used;
            let start = opener.start + remaining;
            let pipes = std::mem::take(&mut opener.pipes);
            if remaining >= 2 {
                opener.kind = Kind::Braces(remaining);
            } else {
                self.stack.truncate(index);
            }

            while self.found.last().is_some_and(|c| c.start >= start) {
                self.found.pop();
            }
            self.found.push(Construct {
                start,
                end: at + used,
                braces: used,
                pipes,
            });
            at += used;
            run -= used;
        }
    }
}
