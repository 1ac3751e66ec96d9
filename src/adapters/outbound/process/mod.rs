/// External process adapters
mod installer;

pub use installer::{
    DisabledArtifactPublisher, ProcessArtifactPublisher, DEFAULT_INSTALLER,
    DEFAULT_INSTALLER_TIMEOUT,
};
