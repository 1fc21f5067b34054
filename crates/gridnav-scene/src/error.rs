use gridnav_paths::PathError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("no walkable start/target pair found in {attempts} attempts")]
    NoWalkablePair { attempts: usize },
    #[error(transparent)]
    Path(#[from] PathError),
}
