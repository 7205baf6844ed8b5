use thiserror::Error;

/// Failures decoding structured content: reference-marker targets and
/// YAML-bearing blocks.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed orb reference '{target}': {source}")]
    MalformedTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("orb reference '{target}' is missing an id")]
    MissingId { target: String },

    #[error("invalid ref type \"{value}\"")]
    InvalidRefKind { value: String },

    #[error("invalid yaml block at line {line}: {source}")]
    Yaml {
        line: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Operations forbidden by the build context.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("embeds are prohibited in this context (orb '{alias}')")]
    EmbedsProhibited { alias: String },
}

/// Any failure aborting a build pass. No partial result is returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type BuildResult<T> = Result<T, BuildError>;
