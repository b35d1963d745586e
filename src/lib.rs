pub mod alias;
pub mod citation;
pub mod classification;
pub mod config;
pub mod country;
pub mod dates;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod locator;
pub mod markup;
pub mod normalizer;
pub mod party;
pub mod types;

pub use classification::Classification;
pub use config::NormalizerConfig;
pub use country::CountryCode;
pub use diagnostics::Diagnostic;
pub use dialect::Dialect;
pub use error::NormalizeError;
pub use normalizer::{normalize, normalize_with_config, Normalized};
pub use types::{CanonicalPatentDocument, Citation, ClaimSet, Party, TextEntry};
