//! Project naming, target resolution and the initialization workflow

pub mod init;
pub mod name;
pub mod target;

pub use init::{
    prepare_directory, CreatedProject, InitError, InitObserver, InitOutcome, ProjectInitializer,
    SilentObserver, Step, StepError,
};
pub use name::{validate, ValidationErrors};
pub use target::ProjectTarget;
