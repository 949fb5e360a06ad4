use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Invalid launch epoch: {0}")]
    InvalidLaunchEpoch(String),

    #[error("Invalid propulsion variant: {0}")]
    InvalidPropulsionVariant(String),

    #[error("Invalid payload class: {0}")]
    InvalidPayloadClass(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Remote estimation service answered with HTTP status {0}")]
    RemoteStatus(u16),

    #[error("Malformed remote estimation response: {0}")]
    MalformedRemoteResponse(String),

    #[error("Remote estimation service is not configured")]
    RemoteUnavailable,

    #[error("Unable to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Unable to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("A simulation run is already in flight")]
    RunInFlight,

    #[error("Simulation run was reset before it settled")]
    RunSuperseded,
}

impl PartialEq for InterceptError {
    fn eq(&self, other: &Self) -> bool {
        use InterceptError::*;
        match (self, other) {
            (InvalidLaunchEpoch(a), InvalidLaunchEpoch(b)) => a == b,
            (InvalidPropulsionVariant(a), InvalidPropulsionVariant(b)) => a == b,
            (InvalidPayloadClass(a), InvalidPayloadClass(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (InvalidUrl(a), InvalidUrl(b)) => a == b,
            (RemoteStatus(a), RemoteStatus(b)) => a == b,
            (MalformedRemoteResponse(a), MalformedRemoteResponse(b)) => a == b,

            // foreign errors are not comparable, same variant is enough
            (ReqwestError(_), ReqwestError(_)) => true,
            (ConfigIo(_), ConfigIo(_)) => true,
            (ConfigParse(_), ConfigParse(_)) => true,

            (RemoteUnavailable, RemoteUnavailable) => true,
            (RunInFlight, RunInFlight) => true,
            (RunSuperseded, RunSuperseded) => true,

            _ => false,
        }
    }
}
