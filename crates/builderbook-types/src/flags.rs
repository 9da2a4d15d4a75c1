//! Builder attribute flags and selection masks.
//!
//! The registry describes every builder with a fixed, ordered set of named
//! boolean attributes. Filter queries select which attributes to constrain
//! via a [`FlagSet`] -- a typed fixed-width bit set, one bit per flag, never
//! positional struct layout.

use serde::{Deserialize, Serialize};

use std::fmt;

/// The named boolean attributes a builder record carries.
///
/// The declaration order is canonical: it fixes the bit position of each flag
/// in a [`FlagSet`] and the comparison order of the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderFlag {
    /// The builder is currently operating.
    Active,
    /// The curator recommends this builder.
    Recommended,
    /// Supports payments through a trusted intermediary.
    TrustedPayment,
    /// Supports trustless (escrowed) payments.
    TrustlessPayment,
    /// The builder filters OFAC-sanctioned transactions.
    OfacCompliant,
    /// The builder accepts blob-carrying payloads.
    BlobSupport,
}

impl BuilderFlag {
    /// All flags in canonical order.
    pub const ALL: [BuilderFlag; 6] = [
        BuilderFlag::Active,
        BuilderFlag::Recommended,
        BuilderFlag::TrustedPayment,
        BuilderFlag::TrustlessPayment,
        BuilderFlag::OfacCompliant,
        BuilderFlag::BlobSupport,
    ];

    /// Bit position of this flag within a [`FlagSet`].
    pub const fn bit(self) -> u8 {
        match self {
            BuilderFlag::Active => 0,
            BuilderFlag::Recommended => 1,
            BuilderFlag::TrustedPayment => 2,
            BuilderFlag::TrustlessPayment => 3,
            BuilderFlag::OfacCompliant => 4,
            BuilderFlag::BlobSupport => 5,
        }
    }
}

impl fmt::Display for BuilderFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuilderFlag::Active => "active",
            BuilderFlag::Recommended => "recommended",
            BuilderFlag::TrustedPayment => "trusted_payment",
            BuilderFlag::TrustlessPayment => "trustless_payment",
            BuilderFlag::OfacCompliant => "ofac_compliant",
            BuilderFlag::BlobSupport => "blob_support",
        };
        write!(f, "{name}")
    }
}

/// A set of [`BuilderFlag`]s, used as the selection mask of filter queries.
///
/// One bit per named flag; the empty set selects nothing (and therefore
/// matches every builder when used as a filter mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagSet(u8);

impl FlagSet {
    const ALL_BITS: u8 = (1 << BuilderFlag::ALL.len()) - 1;

    /// The empty set: no flags selected.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The full set: every named flag selected.
    pub const fn all() -> Self {
        Self(Self::ALL_BITS)
    }

    /// Whether no flags are selected.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `flag` is in the set.
    pub const fn contains(self, flag: BuilderFlag) -> bool {
        self.0 & (1 << flag.bit()) != 0
    }

    /// Add `flag` to the set.
    pub fn insert(&mut self, flag: BuilderFlag) {
        self.0 |= 1 << flag.bit();
    }

    /// Remove `flag` from the set.
    pub fn remove(&mut self, flag: BuilderFlag) {
        self.0 &= !(1 << flag.bit());
    }

    /// Builder-style variant of [`insert`](Self::insert) for chaining.
    #[must_use]
    pub const fn with(self, flag: BuilderFlag) -> Self {
        Self(self.0 | (1 << flag.bit()))
    }

    /// Number of selected flags.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the selected flags in canonical order.
    pub fn iter(self) -> impl Iterator<Item = BuilderFlag> {
        BuilderFlag::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<BuilderFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = BuilderFlag>>(iter: I) -> Self {
        let mut set = Self::empty();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write!(f, "{{")?;
        for flag in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{flag}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// The full attribute record stored for one builder.
///
/// Field order mirrors the canonical order of [`BuilderFlag::ALL`]; the
/// [`get`](Self::get) and [`set`](Self::set) accessors are the only mapping
/// between the two -- nothing reads the struct layout positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuilderFlags {
    pub active: bool,
    pub recommended: bool,
    pub trusted_payment: bool,
    pub trustless_payment: bool,
    pub ofac_compliant: bool,
    pub blob_support: bool,
}

impl BuilderFlags {
    /// All flags false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value of one named flag.
    pub const fn get(&self, flag: BuilderFlag) -> bool {
        match flag {
            BuilderFlag::Active => self.active,
            BuilderFlag::Recommended => self.recommended,
            BuilderFlag::TrustedPayment => self.trusted_payment,
            BuilderFlag::TrustlessPayment => self.trustless_payment,
            BuilderFlag::OfacCompliant => self.ofac_compliant,
            BuilderFlag::BlobSupport => self.blob_support,
        }
    }

    /// Write the value of one named flag.
    pub fn set(&mut self, flag: BuilderFlag, value: bool) {
        match flag {
            BuilderFlag::Active => self.active = value,
            BuilderFlag::Recommended => self.recommended = value,
            BuilderFlag::TrustedPayment => self.trusted_payment = value,
            BuilderFlag::TrustlessPayment => self.trustless_payment = value,
            BuilderFlag::OfacCompliant => self.ofac_compliant = value,
            BuilderFlag::BlobSupport => self.blob_support = value,
        }
    }

    /// Builder-style variant of [`set`](Self::set) for chaining.
    #[must_use]
    pub fn with(mut self, flag: BuilderFlag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    /// The set of flags currently true in this record.
    pub fn true_set(&self) -> FlagSet {
        BuilderFlag::ALL
            .into_iter()
            .filter(|f| self.get(*f))
            .collect()
    }
}
