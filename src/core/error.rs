use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No opponent profile available for fight {enemy_id}")]
    MissingOpponentProfile { enemy_id: String },

    #[error("Opponent move pattern for fight {enemy_id} sums to zero")]
    MalformedPattern { enemy_id: String },

    #[error("No legal move: every move is on cooldown or out of charges")]
    NoLegalMove,

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
