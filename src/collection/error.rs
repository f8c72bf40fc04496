//! Error code related to data collection.

use std::borrow::Cow;

use thiserror::Error;

use super::network::InterfaceStats;

/// A type alias for handling collection-related errors.
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// The errors that can happen while looking up interface stats.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The interface name was empty.
    #[error("Invalid argument, the interface name must not be empty")]
    InvalidArgument,
    /// The statistics table couldn't be opened.
    #[error("Resource unavailable, {0}")]
    ResourceUnavailable(#[source] std::io::Error),
    /// The table was read, but no row matched the interface.
    #[error("Interface '{0}' was not found in the statistics table")]
    NotFound(String),
    /// The clock failed. Never surfaced from a lookup; caching is just skipped.
    #[error("Time source unavailable, {0}")]
    TimeSourceUnavailable(Cow<'static, str>),
    /// The bit rate source failed. Never surfaced from a lookup.
    #[error("Speed source unavailable, {0}")]
    SpeedSourceUnavailable(Cow<'static, str>),
}

impl CollectionError {
    /// A time source error.
    pub fn time_source<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Self::TimeSourceUnavailable(reason.into())
    }

    /// A speed source error.
    pub fn speed_source<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Self::SpeedSourceUnavailable(reason.into())
    }
}

/// A failed lookup.
///
/// Callers that only want the best available numbers can ignore the error
/// and read [`LookupFailure::stats`], which is always zeroed with the default
/// bit rate.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct LookupFailure {
    #[source]
    error: CollectionError,
    stats: InterfaceStats,
}

impl LookupFailure {
    pub(crate) fn new(error: CollectionError) -> Self {
        Self {
            error,
            stats: InterfaceStats::default(),
        }
    }

    /// The reason the lookup failed.
    pub fn error(&self) -> &CollectionError {
        &self.error
    }

    /// The stats reported alongside the failure.
    pub fn stats(&self) -> InterfaceStats {
        self.stats
    }
}
