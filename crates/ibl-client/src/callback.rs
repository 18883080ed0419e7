//! Callback-style consumption of catalogue calls.
//!
//! Every client method returns a future. These adapters attach a completion
//! handler to such a future without changing what it resolves to, so the same
//! call can be awaited, observed through a callback, or both.

use std::future::Future;

use anyhow::Result;
use futures::FutureExt;

/// Awaits `future`, hands the outcome to `callback` if one is given, and
/// returns the outcome unchanged.
///
/// The callback sees `Ok(&value)` on success and `Err(&error)` on failure.
///
/// # Errors
///
/// Returns the error `future` resolved to.
pub async fn register_callback<T, F, C>(future: F, callback: Option<C>) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: FnOnce(Result<&T, &anyhow::Error>),
{
    let result = future.await;
    if let Some(callback) = callback {
        callback(result.as_ref());
    }
    result
}

/// Extension for attaching a callback to any fallible future.
pub trait AsCallback<T>: Future<Output = Result<T>> + Sized {
    /// Invokes `callback` with the outcome once the future resolves.
    ///
    /// The returned future still resolves to the original result.
    fn as_callback<C>(self, callback: C) -> impl Future<Output = Result<T>>
    where
        C: FnOnce(Result<&T, &anyhow::Error>),
    {
        self.inspect(move |result| callback(result.as_ref()))
    }
}

impl<T, F> AsCallback<T> for F where F: Future<Output = Result<T>> {}
