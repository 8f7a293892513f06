use std::fmt;

use crate::entity::EntityKind;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NoSpawnPoints,
    EmptyPool { kind: EntityKind },
    PoolTooLarge { kind: EntityKind, requested: usize, max: usize },
    Pool(PoolError),
    InvalidSpawnInterval { min: f32, max: f32 },
    InvalidDuration { field: &'static str, value: f32 },
    Io { path: String, message: String },
    Parse { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpawnPoints => write!(f, "arena has no spawn points"),
            Self::EmptyPool { kind } => write!(f, "{kind} pool must start with at least one slot"),
            Self::PoolTooLarge { kind, requested, max } => {
                write!(f, "{kind} pool cannot start with {requested} slots (limit {max})")
            }
            Self::Pool(err) => write!(f, "{err}"),
            Self::InvalidSpawnInterval { min, max } => write!(
                f,
                "invalid spawn interval: min={min}, max={max} (need 0 <= min <= max)"
            ),
            Self::InvalidDuration { field, value } => {
                write!(f, "invalid duration for `{field}`: {value}")
            }
            Self::Io { path, message } => write!(f, "could not read config {path}: {message}"),
            Self::Parse { message } => write!(f, "could not parse config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<PoolError> for ConfigError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolError {
    IndexSpaceExhausted { kind: EntityKind },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexSpaceExhausted { kind } => {
                write!(f, "{kind} pool cannot grow: slot index space exhausted")
            }
        }
    }
}

impl std::error::Error for PoolError {}
