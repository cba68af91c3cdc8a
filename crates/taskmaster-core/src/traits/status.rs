//! Status change stream trait.

use futures_core::Stream;

use crate::AuthStatus;

/// A stream of session status changes, one item per transition.
pub trait StatusStream: Stream<Item = AuthStatus> + Send {}

impl<T> StatusStream for T where T: Stream<Item = AuthStatus> + Send {}
