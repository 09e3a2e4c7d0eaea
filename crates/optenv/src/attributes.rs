use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Behavioral flags attached to a registered option.
///
/// Flags combine with `|`:
///
/// ```
/// use optenv::Attributes;
///
/// let attrs = Attributes::OPTIONAL | Attributes::MULTI_VALUE;
/// assert!(attrs.contains(Attributes::OPTIONAL));
/// assert_eq!(attrs.to_string(), "Optional, MultiValue");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attributes(u8);

impl Attributes {
    pub const NONE: Self = Self(0);
    /// The option may be absent from argv without producing an error.
    pub const OPTIONAL: Self = Self(1);
    /// A single-value option may appear without its value.
    pub const OPTIONAL_VALUE: Self = Self(1 << 1);
    /// A multi-value option collects a run of following tokens.
    pub const MULTI_VALUE: Self = Self(1 << 2);
    /// A multi-value option hands every remaining token to a nested command.
    pub const SUB_MODULE: Self = Self(1 << 3);

    const NAMED: [(Self, &'static str); 4] = [
        (Self::OPTIONAL, "Optional"),
        (Self::OPTIONAL_VALUE, "OptionalValue"),
        (Self::MULTI_VALUE, "MultiValue"),
        (Self::SUB_MODULE, "SubModule"),
    ];

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the flags that are set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Self> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(flag, _)| flag)
    }

    /// Names of the set flags, in declaration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for Attributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join(", "))
    }
}
