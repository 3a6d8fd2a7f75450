//! Pure status engine: decision functions over already-fetched snapshots.
//! Nothing in here performs I/O or reads the clock; callers pass `today`/`now`.

/// `as_str`, `Display` and `FromStr` for enums persisted as upper-case codes.
macro_rules! string_codes {
    ($ty:ident, $label:literal, { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::domain::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::domain::error::DomainError::validation(format!(
                        concat!("unknown ", $label, " {:?}"),
                        s
                    ))),
                }
            }
        }
    };
}

pub mod dates;
pub mod error;
pub mod folio;
pub mod reservation;
pub mod task;
pub mod views;

pub use error::{DomainError, DomainResult};
