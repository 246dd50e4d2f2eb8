#![forbid(unsafe_code)]

//! The closed registry of XAdES signature profiles.
//!
//! Forms defined in ETSI TS 101 903 V1.3.2 clause 4.4 (BES, EPES, T, C) and
//! annex B (X, X-L, A), plus the baseline levels of ETSI EN 319 132-1
//! V1.1.1 clause 6.

use std::fmt;
use std::str::FromStr;

use xades_core::Error;

/// A XAdES signature form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profile {
    /// Basic Electronic Signature.
    Bes,
    /// Explicit Policy based Electronic Signature.
    Epes,
    /// Electronic Signature with Time.
    T,
    /// Electronic Signature with Complete Validation Data References.
    C,
    /// Extended Signature with Time Forms.
    X,
    /// Extended Long Electronic Signature with Time.
    XL,
    /// Archival Electronic Signature.
    A,
    /// Baseline B-level.
    BLevel,
    /// Baseline T-level.
    TLevel,
}

impl Profile {
    /// Every profile, in registry order.
    pub const ALL: [Profile; 9] = [
        Profile::Bes,
        Profile::Epes,
        Profile::T,
        Profile::C,
        Profile::X,
        Profile::XL,
        Profile::A,
        Profile::BLevel,
        Profile::TLevel,
    ];

    /// Code used by the standards, e.g. `XAdES-BES` or `B-B-LEVEL`.
    pub const fn code(self) -> &'static str {
        match self {
            Profile::Bes => "XAdES-BES",
            Profile::Epes => "XAdES-EPES",
            Profile::T => "XAdES-T",
            Profile::C => "XAdES-C",
            Profile::X => "XAdES-X",
            Profile::XL => "XAdES-X-L",
            Profile::A => "XAdES-A",
            Profile::BLevel => "B-B-LEVEL",
            Profile::TLevel => "B-T-LEVEL",
        }
    }

    /// Short name, e.g. `BES` or `X-L`.
    pub const fn name(self) -> &'static str {
        match self {
            Profile::Bes => "BES",
            Profile::Epes => "EPES",
            Profile::T => "T",
            Profile::C => "C",
            Profile::X => "X",
            Profile::XL => "X-L",
            Profile::A => "A",
            Profile::BLevel => "B-LEVEL",
            Profile::TLevel => "T-LEVEL",
        }
    }

    /// Clause of the defining standard.
    pub const fn spec_section(self) -> &'static str {
        match self {
            Profile::Bes => "4.4.1",
            Profile::Epes => "4.4.2",
            Profile::T => "4.4.3.1",
            Profile::C => "4.4.3.2",
            Profile::X => "B.1",
            Profile::XL => "B.2",
            Profile::A => "B.3",
            Profile::BLevel | Profile::TLevel => "ETSI EN 319 132-1 V1.1.1 6.3",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Profile::Bes => "Basic Electronic Signature",
            Profile::Epes => "Explicit Policy Electronic Signatures",
            Profile::T => "Electronic Signature with Time",
            Profile::C => "Electronic Signature with Complete Validation Data References",
            Profile::X => "Extended Signatures with Time Forms",
            Profile::XL => "Extended Long Electronic Signatures with Time",
            Profile::A => "Archival Electronic Signatures",
            Profile::BLevel => "XAdES BASELINE B-LEVEL",
            Profile::TLevel => "XAdES BASELINE T-LEVEL",
        }
    }

    /// Position in [`Profile::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The form this one extends with additional properties.
    pub const fn base(self) -> Option<Profile> {
        match self {
            Profile::Bes | Profile::BLevel => None,
            Profile::Epes => Some(Profile::Bes),
            Profile::T => Some(Profile::Epes),
            Profile::C => Some(Profile::T),
            Profile::X => Some(Profile::C),
            Profile::XL => Some(Profile::X),
            Profile::A => Some(Profile::XL),
            Profile::TLevel => Some(Profile::BLevel),
        }
    }

    /// This profile followed by every profile it extends.
    pub fn lineage(self) -> impl Iterator<Item = Profile> {
        std::iter::successors(Some(self), |p| p.base())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Profile {
    type Err = Error;

    /// Accepts either the code (`XAdES-X-L`) or the short name (`X-L`),
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s) || p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownProfile(s.to_owned()))
    }
}
