use thiserror::Error;

/// Failures surfaced by the boost/lookup collaborators the router depends on.
///
/// These map to the error kinds of §7: most of them are isolated to a single
/// tenant or profile and never abort an in-flight [`crate::router::Router::publish`]
/// call; [`CoreError::UnknownStrategy`] is the exception (see [`PublishError`]).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("tenant store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("malformed urn {0:?}")]
    MalformedUrn(String),

    #[error("boost lookup failed for fixture {fixture}: {source}")]
    BoostLookupFailure { fixture: String, source: anyhow::Error },

    #[error("unknown boost strategy: {0}")]
    UnknownStrategy(String),

    #[error("broker publish failed for tenant {tenant}: {source}")]
    BrokerFailure { tenant: String, source: anyhow::Error },

    #[error("archive serialization failed: {0}")]
    SerializationFailure(anyhow::Error),

    #[error("archive write failed: {0}")]
    ArchiveFailure(anyhow::Error),
}

/// Failures that abort a [`crate::router::Router::publish`] call entirely,
/// before any broker call is issued. Per §7, these are the conditions that
/// abort a route resolving to a single shared message: a `sportUrn` that
/// doesn't parse, a boost referencing an unregistered strategy, or any other
/// failure resolving the boost for that route (store outage, lookup error).
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("malformed sport urn {urn:?}: {source}")]
    MalformedSportUrn { urn: String, source: anyhow::Error },

    #[error("boost configured with unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("boost resolution failed: {source}")]
    BoostResolutionFailed { source: anyhow::Error },
}
