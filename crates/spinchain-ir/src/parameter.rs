//! Parameter expressions for parameterized circuits.
//!
//! Gate angles are either concrete numbers or symbolic placeholders that are
//! bound later (for variational use). Placeholders come in two flavours: a
//! free-standing named [`ParameterExpression::Symbol`], and an element of a
//! [`ParameterVector`], identified by the vector's tag and an index.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A symbolic or concrete parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A named symbolic parameter.
    Symbol(String),
    /// One entry of a [`ParameterVector`].
    Element {
        /// Tag of the owning vector.
        vector: String,
        /// Position within the vector.
        index: u32,
    },
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// Create a reference to entry `index` of the vector tagged `vector`.
    pub fn element(vector: impl Into<String>, index: u32) -> Self {
        ParameterExpression::Element {
            vector: vector.into(),
            index,
        }
    }

    /// Multiply by a numeric factor.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            ParameterExpression::Constant(v) => ParameterExpression::Constant(v * factor),
            other => ParameterExpression::Constant(factor) * other,
        }
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) | ParameterExpression::Element { .. } => true,
            ParameterExpression::Constant(_) => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b) | ParameterExpression::Mul(a, b) => {
                a.is_symbolic() || b.is_symbolic()
            }
        }
    }

    /// Try to evaluate as a concrete f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) | ParameterExpression::Element { .. } => None,
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// Name under which a leaf placeholder is bound, `None` for non-leaves.
    pub fn placeholder_name(&self) -> Option<String> {
        match self {
            ParameterExpression::Symbol(name) => Some(name.clone()),
            ParameterExpression::Element { vector, index } => Some(format!("{vector}[{index}]")),
            _ => None,
        }
    }

    /// Get all symbol names in this expression.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut names = vec![];
        self.collect_symbols(&mut names);
        names.into_iter().collect()
    }

    /// Push symbol names in traversal order (duplicates included).
    pub(crate) fn collect_symbols(&self, out: &mut Vec<String>) {
        match self {
            ParameterExpression::Constant(_) => {}
            ParameterExpression::Symbol(_) | ParameterExpression::Element { .. } => {
                out.extend(self.placeholder_name());
            }
            ParameterExpression::Neg(e) => e.collect_symbols(out),
            ParameterExpression::Add(a, b) | ParameterExpression::Mul(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    /// Bind a symbol to a value, returning a new expression.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.substitute(&|leaf| (leaf == name).then_some(value))
    }

    /// Bind every placeholder found in `values`, leaving the rest symbolic.
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        self.substitute(&|leaf| values.get(leaf).copied())
    }

    fn substitute(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Self {
        match self {
            ParameterExpression::Symbol(_) | ParameterExpression::Element { .. } => self
                .placeholder_name()
                .and_then(|name| lookup(&name))
                .map_or_else(|| self.clone(), ParameterExpression::Constant),
            ParameterExpression::Constant(_) => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.substitute(lookup))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.substitute(lookup)),
                Box::new(b.substitute(lookup)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.substitute(lookup)),
                Box::new(b.substitute(lookup)),
            ),
        }
    }

    /// Simplify the expression by evaluating constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return ParameterExpression::Constant(v);
        }
        match self {
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.simplify())),
            ParameterExpression::Add(a, b) => {
                ParameterExpression::Add(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Mul(a, b) => {
                let (a, b) = (a.simplify(), b.simplify());
                match (a.as_f64(), b.as_f64()) {
                    (Some(av), _) if av == 1.0 => b,
                    (_, Some(bv)) if bv == 1.0 => a,
                    _ => ParameterExpression::Mul(Box::new(a), Box::new(b)),
                }
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => write!(f, "{name}"),
            ParameterExpression::Element { vector, index } => write!(f, "{vector}[{index}]"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "{a}*{b}"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::Constant(f64::from(value))
    }
}

impl From<&ParameterExpression> for ParameterExpression {
    fn from(value: &ParameterExpression) -> Self {
        value.clone()
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}

/// A fixed-length vector of symbolic placeholders sharing one tag.
///
/// Element `i` of a vector tagged `θ3` is rendered and bound as `θ3[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterVector {
    name: String,
    len: u32,
}

impl ParameterVector {
    /// Create a vector of `len` placeholders tagged `name`.
    pub fn new(name: impl Into<String>, len: u32) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }

    /// The vector's tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `index`, or `None` past the end.
    pub fn element(&self, index: u32) -> Option<ParameterExpression> {
        (index < self.len).then(|| ParameterExpression::element(&self.name, index))
    }

    /// All elements in index order.
    pub fn elements(&self) -> impl Iterator<Item = ParameterExpression> + '_ {
        (0..self.len).map(|i| ParameterExpression::element(&self.name, i))
    }

    /// All elements collected into a `Vec`.
    pub fn params(&self) -> Vec<ParameterExpression> {
        self.elements().collect()
    }
}
