//! Driven port for an external machine-translation engine.
//!
//! No production adapter ships with the service; suggestions fall back to the
//! built-in phrase dictionary when none is configured.

use async_trait::async_trait;

use crate::domain::Language;

use super::define_port_error;

define_port_error! {
    /// Errors raised by machine translation adapters.
    pub enum MachineTranslatorError {
        /// The engine could not be reached.
        Unavailable { message: String } => ServiceUnavailable:
            "machine translator unavailable: {message}",
        /// The engine rejected or failed the request.
        Rejected { message: String } => InternalError:
            "machine translator rejected the request: {message}",
    }
}

/// Translate free text between supported languages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, MachineTranslatorError>;
}
