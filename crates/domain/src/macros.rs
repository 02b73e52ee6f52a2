//! Macro for implementing Display and FromStr for domain enums
//!
//! Eliminates boilerplate for enums that travel as plain strings (config
//! values, query parameters). Parsing is case-insensitive and output is a
//! stable lowercase string.
//!
//! # Example
//!
//! ```rust
//! use sectorgrid_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Backend {
//!     Sqlite,
//!     Postgres,
//! }
//!
//! impl_domain_status_conversions!(Backend {
//!     Sqlite => "sqlite",
//!     Postgres => "postgres",
//! });
//!
//! assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
//! assert_eq!(Backend::Postgres.to_string(), "postgres");
//! ```

/// Implements Display and FromStr traits for string-backed enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
