//! Some helper datatypes

use crate::vec_map::NumericId;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Not;
use tinyvec::TinyVec;

/// The error raised when a branch of the search fails and has to be
/// backtracked
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Unsat;

/// A clause is the disjunction (OR) of a bunch of literals
// The number 6 chosen bc it's the most a TinyVec can store in 32 bytes
// (on x86_64, given that Literal is 4 bytes)
pub type Clause = TinyVec<[Literal; 6]>;

/// A variable ID
///
/// Zero-based: DIMACS variable `v` is `VarId(v - 1)`. All ids are less than
/// 2^31
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarId(pub u32);

impl VarId {
    #[inline]
    pub fn new(id: u32) -> Self {
        assert!(id < 1 << 31);
        Self(id)
    }

    /// The 1-based number used for this variable in DIMACS files
    #[inline]
    pub fn dimacs(self) -> u32 {
        self.0 + 1
    }
}

impl NumericId for VarId {
    #[inline]
    fn to_index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        Self::new(index as u32)
    }
}

/// A literal is either a variable or the negation of a variable
///
/// They are encoded in 32 bits using a 31-bit numerical id, plus a flag for
/// whether they're negated
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Literal {
    inner: u32,
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "Literal(neg {:?})", self.var_id())
        } else {
            write!(f, "Literal({:?})", self.var_id())
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            inner: self.inner ^ 1,
        }
    }
}

/// Required for `TinyVec`.  Please don't use.
impl Default for Literal {
    fn default() -> Self {
        Self { inner: 0 }
    }
}

impl Literal {
    /// Make a new (non-negated) literal with the given ID.
    #[inline]
    pub fn new(id: VarId) -> Self {
        Self { inner: id.0 << 1 }
    }

    /// The literal that makes `id` take the given value
    #[inline]
    pub fn with_value(id: VarId, value: bool) -> Self {
        if value {
            Self::new(id)
        } else {
            !Self::new(id)
        }
    }

    /// Convert from the signed, 1-based DIMACS encoding
    ///
    /// Returns `None` for `0`, which is a clause terminator and not a literal
    pub fn from_dimacs(lit: i32) -> Option<Self> {
        if lit == 0 {
            return None;
        }
        let var = VarId::new(lit.unsigned_abs() - 1);
        Some(Self::with_value(var, lit > 0))
    }

    pub fn to_dimacs(self) -> i64 {
        let id = i64::from(self.var_id().dimacs());
        if self.is_negated() {
            -id
        } else {
            id
        }
    }

    #[inline]
    pub fn var_id(self) -> VarId {
        VarId(self.inner >> 1)
    }

    #[inline]
    pub fn is_negated(self) -> bool {
        self.inner & 1 != 0
    }

    /// The value the variable needs for this literal to be true
    #[inline]
    pub fn polarity(self) -> bool {
        !self.is_negated()
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum VarState {
    False,
    True,
    /// Hasn't been assigned yet
    Unknown,
}
pub use VarState::*;

impl Not for VarState {
    type Output = VarState;

    fn not(self) -> Self::Output {
        match self {
            False => True,
            True => False,
            Unknown => Unknown,
        }
    }
}

impl From<bool> for VarState {
    fn from(value: bool) -> Self {
        if value {
            True
        } else {
            False
        }
    }
}
