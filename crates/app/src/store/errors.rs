//! Store errors.

use mesa::{checkout::CheckoutErrors, flow::FlowError};
use thiserror::Error;

use crate::api::{ApiError, TokenStoreError};

/// Errors returned by orchestrated store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API call failed; the message is also shown as the UI error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Checkout input was invalid; nothing was sent.
    #[error(transparent)]
    Checkout(#[from] CheckoutErrors),

    /// The ordering flow does not allow this step.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// The session token could not be read or written.
    #[error(transparent)]
    Tokens(#[from] TokenStoreError),

    /// The same operation on the same target is still running.
    #[error("{operation} is already in progress")]
    AlreadyInFlight {
        /// Operation name
        operation: &'static str,
    },
}
