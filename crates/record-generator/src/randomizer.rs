//! The value-producing capability plugged into the registry.

use record_core::Value;

/// Error raised by a randomizer while producing a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RandomizerError {
    /// The randomizer could not produce a value
    #[error("{0}")]
    Failed(String),

    /// A previous panic left the randomizer's state unusable
    #[error("randomizer state is poisoned")]
    Poisoned,
}

impl RandomizerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Produces one value on demand.
///
/// The populator never inspects how the value is made and uses it verbatim.
/// Any closure `Fn() -> Result<Value, RandomizerError>` is a randomizer:
///
/// ```rust
/// use record_core::Value;
/// use record_generator::{Randomizer, RandomizerError};
///
/// let city = || Ok::<_, RandomizerError>(Value::from("Lisbon"));
/// assert_eq!(city.random_value(), Ok(Value::from("Lisbon")));
/// ```
pub trait Randomizer: Send + Sync {
    fn random_value(&self) -> Result<Value, RandomizerError>;
}

impl<F> Randomizer for F
where
    F: Fn() -> Result<Value, RandomizerError> + Send + Sync,
{
    fn random_value(&self) -> Result<Value, RandomizerError> {
        self()
    }
}
