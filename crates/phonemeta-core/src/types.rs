//! Metadata types and generation variants.
//!
//! A [`MetadataType`] names the kind of artifact being produced, a [`Variant`]
//! names how its content is shaped. Together they determine the basename of the
//! generated file and of the token used to request it on the command line:
//!
//! | Variant | Template | `MetadataType::ShortNumbers` |
//! |---------|----------|------------------------------|
//! | `Full`  | `%s`      | `short_numbers`      |
//! | `Test`  | `test_%s` | `test_short_numbers` |
//! | `Lite`  | `lite_%s` | `lite_short_numbers` |

use std::fmt;

/// Kind of metadata artifact that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataType {
    /// The basic phone number metadata (written to `metadata.rs`).
    Metadata,
    /// Alternate number formats (written to `alternate_format.rs`).
    AlternateFormat,
    /// Short number metadata (written to `short_numbers.rs`).
    ShortNumbers,
}

/// Static per-type data: canonical name, year first introduced, year last modified.
struct TypeInfo {
    name: &'static str,
    copyright_year: u16,
    copyright_second_year: u16,
}

static TYPE_TABLE: [TypeInfo; 3] = [
    TypeInfo {
        name: "metadata",
        copyright_year: 2011,
        copyright_second_year: 2025,
    },
    TypeInfo {
        name: "alternate_format",
        copyright_year: 2012,
        copyright_second_year: 2025,
    },
    TypeInfo {
        name: "short_numbers",
        copyright_year: 2013,
        copyright_second_year: 2025,
    },
];

impl MetadataType {
    /// All types in declaration order.
    pub const ALL: [Self; 3] = [Self::Metadata, Self::AlternateFormat, Self::ShortNumbers];

    fn info(self) -> &'static TypeInfo {
        &TYPE_TABLE[self as usize]
    }

    /// Canonical lowercase name, e.g. `alternate_format`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Year in which this metadata type was first introduced.
    #[must_use]
    pub fn copyright_year(self) -> u16 {
        self.info().copyright_year
    }

    /// Year in which this metadata type was last modified.
    #[must_use]
    pub fn copyright_second_year(self) -> u16 {
        self.info().copyright_second_year
    }

    /// All types, used to build usage text.
    #[must_use]
    pub const fn values() -> &'static [Self] {
        &Self::ALL
    }

    /// Parses a type from its canonical name, ignoring ASCII case.
    ///
    /// Only exact matches are accepted; `"meta"` does not resolve to
    /// [`MetadataType::Metadata`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content-shaping mode of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// All of the metadata.
    #[default]
    Full,
    /// Fake data used by the downstream library's tests.
    Test,
    /// Full metadata without example numbers, for space constrained clients.
    Lite,
}

impl Variant {
    /// All variants in declaration order.
    pub const ALL: [Self; 3] = [Self::Full, Self::Test, Self::Lite];

    /// Prefix prepended to the type name, empty for [`Variant::Full`].
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Full => "",
            Self::Test => "test_",
            Self::Lite => "lite_",
        }
    }

    /// Parses a variant token.
    ///
    /// `"test"` and `"lite"` match case-insensitively; an absent or empty token
    /// means [`Variant::Full`]. Anything else is rejected with `None`.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Option<Self> {
        match token {
            Some(t) if t.eq_ignore_ascii_case("test") => Some(Self::Test),
            Some(t) if t.eq_ignore_ascii_case("lite") => Some(Self::Lite),
            None | Some("") => Some(Self::Full),
            Some(_) => None,
        }
    }

    /// Basename of `ty` under this variant, e.g. `test_metadata`.
    ///
    /// For [`Variant::Full`] this is just the type name.
    #[must_use]
    pub fn basename(self, ty: MetadataType) -> String {
        format!("{}{}", self.prefix(), ty.name())
    }

    /// Whether artifacts of this variant only belong in test builds.
    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }

    /// Whether the converter must drop example numbers for this variant.
    #[must_use]
    pub const fn strips_examples(self) -> bool {
        matches!(self, Self::Lite)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Test => "test",
            Self::Lite => "lite",
        })
    }
}
