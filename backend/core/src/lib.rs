pub mod error;
pub mod traits;
pub mod types;

pub use error::BridgerError;
pub use traits::{LlmProvider, LlmRequest, LlmResponse, TextTransformer};
pub use types::{ColorScheme, HighlightColor, HighlightStyle, Settings, ViewMode};
