//! `Gate`: one element of the `{h, cx, t, tdg}` gate set.
//!
//! # Identity encoding
//!
//! | Gate  | Tag  | Operands                  |
//! |-------|------|---------------------------|
//! | `h`   | 0x01 | qubit (u32 LE)            |
//! | `t`   | 0x02 | qubit (u32 LE)            |
//! | `tdg` | 0x03 | qubit (u32 LE)            |
//! | `cx`  | 0x04 | control, target (u32 LE)  |
//!
//! The derived `Ord` (variant order, then operands) is the tie-break used by
//! the canonical topological order in [`crate::carrier::circuit`].

use std::fmt;

/// A single gate acting on one or two qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gate {
    /// Hadamard.
    H(u32),
    /// π/4 phase.
    T(u32),
    /// Inverse π/4 phase.
    Tdg(u32),
    /// Controlled NOT.
    Cx { control: u32, target: u32 },
}

impl Gate {
    /// QASM mnemonic.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::H(_) => "h",
            Self::T(_) => "t",
            Self::Tdg(_) => "tdg",
            Self::Cx { .. } => "cx",
        }
    }

    /// Identity-encoding tag byte.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::H(_) => 0x01,
            Self::T(_) => 0x02,
            Self::Tdg(_) => 0x03,
            Self::Cx { .. } => 0x04,
        }
    }

    /// The qubits this gate acts on: the first (or only) one, and the second
    /// for two-qubit gates.
    #[must_use]
    pub const fn qubit_pair(&self) -> (u32, Option<u32>) {
        match *self {
            Self::H(q) | Self::T(q) | Self::Tdg(q) => (q, None),
            Self::Cx { control, target } => (control, Some(target)),
        }
    }

    /// Whether this gate acts on qubit `q`.
    #[must_use]
    pub fn touches(&self, q: u32) -> bool {
        let (a, b) = self.qubit_pair();
        a == q || b == Some(q)
    }

    /// Whether this gate and `other` act on at least one common qubit.
    #[must_use]
    pub fn shares_qubit(&self, other: &Self) -> bool {
        let (a, b) = self.qubit_pair();
        other.touches(a) || b.is_some_and(|q| other.touches(q))
    }

    /// Highest qubit index this gate acts on.
    #[must_use]
    pub fn max_qubit(&self) -> u32 {
        let (a, b) = self.qubit_pair();
        b.map_or(a, |b| a.max(b))
    }

    /// The gate that undoes this one on the same qubits.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::H(q) => Self::H(q),
            Self::T(q) => Self::Tdg(q),
            Self::Tdg(q) => Self::T(q),
            Self::Cx { control, target } => Self::Cx { control, target },
        }
    }

    /// Whether this gate is diagonal in the computational basis on qubit `q`.
    ///
    /// `t`/`tdg` are diagonal on their qubit; `cx` is diagonal on its control.
    #[must_use]
    pub fn is_diagonal_on(&self, q: u32) -> bool {
        match *self {
            Self::H(_) => false,
            Self::T(p) | Self::Tdg(p) => p == q,
            Self::Cx { control, .. } => control == q,
        }
    }

    /// Whether swapping this gate with an adjacent `other` preserves the
    /// circuit's unitary.
    ///
    /// Gates on disjoint qubits always commute. Otherwise they commute when
    /// every shared qubit is a diagonal qubit of both gates, or when two `cx`
    /// gates share only their target.
    #[must_use]
    pub fn commutes_with(&self, other: &Self) -> bool {
        if !self.shares_qubit(other) {
            return true;
        }
        if let (
            Self::Cx {
                control: c1,
                target: t1,
            },
            Self::Cx {
                control: c2,
                target: t2,
            },
        ) = (*self, *other)
        {
            if t1 == t2 && c1 != c2 && c1 != t2 && c2 != t1 {
                return true;
            }
        }
        let (a, b) = self.qubit_pair();
        [Some(a), b]
            .into_iter()
            .flatten()
            .filter(|&q| other.touches(q))
            .all(|q| self.is_diagonal_on(q) && other.is_diagonal_on(q))
    }

    /// Append the identity encoding of this gate to `buf`.
    pub fn write_identity(&self, buf: &mut Vec<u8>) {
        buf.push(self.tag());
        let (a, b) = self.qubit_pair();
        buf.extend_from_slice(&a.to_le_bytes());
        if let Some(b) = b {
            buf.extend_from_slice(&b.to_le_bytes());
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::H(q) | Self::T(q) | Self::Tdg(q) => write!(f, "{} q[{q}]", self.name()),
            Self::Cx { control, target } => write!(f, "cx q[{control}],q[{target}]"),
        }
    }
}
