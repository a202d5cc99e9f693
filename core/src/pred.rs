//! Predicate families, implementation selection, and the checker table.
//!
//! Lookup is a two-level enum-keyed table: (implementation, family) resolves
//! to a checker through an exhaustive match, and the only place an unknown
//! name can exist is the string boundary where matrix tokens are resolved.

use std::fmt;

use once_cell::sync::Lazy;

use crate::val::{Val, ViewKind};
use crate::vm::{Op, Program};

/// Named type-check kind under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Wide check: any typed numeric view.
    #[default]
    AnyView,
    /// Narrow check: byte views only.
    ByteView,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::AnyView, Family::ByteView];

    pub fn key(self) -> &'static str {
        match self {
            Family::AnyView => "any-view",
            Family::ByteView => "byte-view",
        }
    }

    /// The empty string selects the wide check, mirroring a matrix entry
    /// that leaves the family unset.
    pub fn resolve(token: &str) -> Result<Self, LookupError> {
        match token {
            "" | "any-view" => Ok(Family::AnyView),
            "byte-view" => Ok(Family::ByteView),
            other => Err(LookupError::Family(other.to_string())),
        }
    }
}

/// Which of the two competing code paths a run measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    Native,
    Scripted,
}

impl Implementation {
    pub const ALL: [Implementation; 2] = [Implementation::Native, Implementation::Scripted];

    pub fn key(self) -> &'static str {
        match self {
            Implementation::Native => "native",
            Implementation::Scripted => "scripted",
        }
    }

    /// `js` is the historical token for the interpreted path and stays
    /// accepted alongside `scripted`.
    pub fn resolve(token: &str) -> Result<Self, LookupError> {
        match token {
            "native" => Ok(Implementation::Native),
            "js" | "scripted" => Ok(Implementation::Scripted),
            other => Err(LookupError::Implementation(other.to_string())),
        }
    }
}

/// Which fixture a run feeds to the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgLabel {
    /// A value that satisfies the family's predicate.
    True,
    /// A non-object value that fails it.
    FalsePrimitive,
    /// An object value that fails it.
    FalseObject,
}

impl ArgLabel {
    pub const ALL: [ArgLabel; 3] = [ArgLabel::True, ArgLabel::FalsePrimitive, ArgLabel::FalseObject];

    pub fn key(self) -> &'static str {
        match self {
            ArgLabel::True => "true",
            ArgLabel::FalsePrimitive => "false-primitive",
            ArgLabel::FalseObject => "false-object",
        }
    }

    pub fn resolve(token: &str) -> Result<Self, LookupError> {
        match token {
            "true" => Ok(ArgLabel::True),
            "false-primitive" => Ok(ArgLabel::FalsePrimitive),
            "false-object" => Ok(ArgLabel::FalseObject),
            other => Err(LookupError::Argument(other.to_string())),
        }
    }
}

/// The configuration named something the tables do not carry. This is a
/// misconfigured benchmark matrix, surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Family(String),
    Implementation(String),
    Argument(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Family(t) => write!(f, "unknown predicate family '{}'", t),
            LookupError::Implementation(t) => write!(f, "unknown implementation '{}'", t),
            LookupError::Argument(t) => write!(f, "unknown argument label '{}'", t),
        }
    }
}

impl std::error::Error for LookupError {}

pub type NativeFn = fn(&Val) -> bool;

/// Wide native check: any typed view.
pub fn is_any_view(v: &Val) -> bool {
    matches!(v, Val::View(_))
}

/// Narrow native check: byte views only.
pub fn is_byte_view(v: &Val) -> bool {
    matches!(v, Val::View(view) if view.kind == ViewKind::Uint8)
}

/// A script without access to internal slots tests each kind in turn.
fn any_view_program() -> Program {
    let mut code = Vec::with_capacity(ViewKind::ALL.len() * 2);
    for (i, kind) in ViewKind::ALL.iter().enumerate() {
        code.push(Op::KindEq(*kind));
        if i > 0 {
            code.push(Op::Or);
        }
    }
    code.push(Op::Ret);
    Program::new(code).expect("builtin wide-check program is well-formed")
}

fn byte_view_program() -> Program {
    Program::new(vec![Op::KindEq(ViewKind::Uint8), Op::Ret])
        .expect("builtin byte-check program is well-formed")
}

/// One resolved predicate: a direct native function or a compiled scripted
/// program.
#[derive(Debug, Clone)]
pub enum Checker {
    Native(NativeFn),
    Scripted(Program),
}

impl Checker {
    #[inline]
    pub fn check(&self, subject: &Val) -> bool {
        match self {
            Checker::Native(f) => f(subject),
            Checker::Scripted(p) => p.eval(subject),
        }
    }
}

/// Implementation × family checker table. The host constructs the table and
/// passes it into the driver; there is no process-global registry to
/// unlock.
#[derive(Debug, Clone)]
pub struct PredicateTable {
    pub native_any: Checker,
    pub native_byte: Checker,
    pub scripted_any: Checker,
    pub scripted_byte: Checker,
}

impl PredicateTable {
    pub fn new() -> Self {
        Self {
            native_any: Checker::Native(is_any_view),
            native_byte: Checker::Native(is_byte_view),
            scripted_any: Checker::Scripted(any_view_program()),
            scripted_byte: Checker::Scripted(byte_view_program()),
        }
    }

    /// Shared instance for benches and tests that do not inject their own.
    pub fn global() -> &'static PredicateTable {
        static TABLE: Lazy<PredicateTable> = Lazy::new(PredicateTable::new);
        &TABLE
    }

    pub fn resolve(&self, implementation: Implementation, family: Family) -> &Checker {
        match (implementation, family) {
            (Implementation::Native, Family::AnyView) => &self.native_any,
            (Implementation::Native, Family::ByteView) => &self.native_byte,
            (Implementation::Scripted, Family::AnyView) => &self.scripted_any,
            (Implementation::Scripted, Family::ByteView) => &self.scripted_byte,
        }
    }
}

impl Default for PredicateTable {
    fn default() -> Self {
        Self::new()
    }
}
