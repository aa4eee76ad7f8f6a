#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid argument")]
    InvalidArg,
    #[error("out of memory")]
    NoMem,
    #[error("block pointer exceeds disk capacity")]
    BlockOverflow,
    #[error("block referenced by more than one file")]
    FileOverlap,
    #[error("block overlaps the directory area")]
    FileDirOverlap,
    #[error("sector callback failed with code {0}")]
    Sector(i32),
}

pub type Result<T> = core::result::Result<T, Error>;
