use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("malformed key of length {0}")]
    MalformedKey(usize),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for vigil_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Serialization(msg) => vigil_store::StoreError::Serialization(msg),
            LmdbError::MalformedKey(len) => {
                vigil_store::StoreError::Corruption(format!("attempt key of length {len}"))
            }
            other => vigil_store::StoreError::Backend(other.to_string()),
        }
    }
}
