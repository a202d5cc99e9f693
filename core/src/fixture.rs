//! Sample values the measured predicates run against.

use anyhow::{Result, bail};
use once_cell::sync::Lazy;

use crate::pred::{ArgLabel, Family, Implementation, PredicateTable};
use crate::val::{ByteBuf, Val, ViewKind};

/// Fixed sample set: one buffer, two views over it, one failing primitive.
/// Built once and read-only for the lifetime of a run.
#[derive(Debug)]
pub struct Fixtures {
    buffer: Val,
    byte_view: Val,
    word_view: Val,
    primitive: Val,
}

impl Fixtures {
    /// The backing buffer is empty; the predicates only look at type
    /// structure, never at contents.
    pub fn new() -> Self {
        let buf = ByteBuf::with_len(0);
        Self {
            byte_view: Val::view(ViewKind::Uint8, &buf),
            word_view: Val::view(ViewKind::Int32, &buf),
            buffer: Val::Buf(buf),
            primitive: Val::Bool(true),
        }
    }

    /// Shared instance for benches and tests that do not inject their own.
    pub fn global() -> &'static Fixtures {
        static FIXTURES: Lazy<Fixtures> = Lazy::new(Fixtures::new);
        &FIXTURES
    }

    /// Subject for a (family, label) pair. The failing object for the wide
    /// check is the raw buffer; for the narrow check it is a view of a
    /// different kind.
    pub fn subject(&self, family: Family, label: ArgLabel) -> &Val {
        match (family, label) {
            (Family::AnyView, ArgLabel::True) => &self.word_view,
            (Family::AnyView, ArgLabel::FalsePrimitive) => &self.primitive,
            (Family::AnyView, ArgLabel::FalseObject) => &self.buffer,
            (Family::ByteView, ArgLabel::True) => &self.byte_view,
            (Family::ByteView, ArgLabel::FalsePrimitive) => &self.primitive,
            (Family::ByteView, ArgLabel::FalseObject) => &self.word_view,
        }
    }

    /// Checks the fixture invariant against every checker: the `true`
    /// subject must satisfy both implementations of its family, both
    /// `false` subjects must fail them.
    pub fn verify(&self, table: &PredicateTable) -> Result<()> {
        for family in Family::ALL {
            for label in ArgLabel::ALL {
                let subject = self.subject(family, label);
                let expected = label == ArgLabel::True;
                for implementation in Implementation::ALL {
                    let actual = table.resolve(implementation, family).check(subject);
                    if actual != expected {
                        bail!(
                            "fixture ({}, {}) expected {} from the {} checker but observed {}",
                            family.key(),
                            label.key(),
                            expected,
                            implementation.key(),
                            actual
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new()
    }
}
