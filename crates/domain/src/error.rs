#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<String> for ReadError {
    fn from(value: String) -> Self {
        ReadError::Other(value.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("{message}")]
    Rejected {
        message: String,
        empty_fields: Vec<String>,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<String> for CreateError {
    fn from(value: String) -> Self {
        CreateError::Other(value.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<String> for DeleteError {
    fn from(value: String) -> Self {
        DeleteError::Other(value.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page and page size must be 1 or greater (page {page}, page size {page_size})")]
    InvalidArgument { page: u32, page_size: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_from_storage_error() {
        assert!(matches!(
            ReadError::from(StorageError::NoConnection),
            ReadError::Storage(StorageError::NoConnection)
        ));
    }

    #[test]
    fn test_read_error_from_string() {
        assert!(matches!(
            ReadError::from("404 Not Found".to_string()),
            ReadError::Other(error) if error.to_string() == "404 Not Found"
        ));
    }

    #[test]
    fn test_create_error() {
        assert!(matches!(
            CreateError::from(StorageError::NoConnection),
            CreateError::Storage(StorageError::NoConnection)
        ));
        assert_eq!(
            CreateError::Rejected {
                message: "Please fill in all fields".to_string(),
                empty_fields: vec!["title".to_string()],
            }
            .to_string(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn test_delete_error_from_string() {
        assert!(matches!(
            DeleteError::from("404 Not Found".to_string()),
            DeleteError::Other(error) if error.to_string() == "404 Not Found"
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StorageError::NoConnection.to_string(), "no connection");
        assert_eq!(
            StorageError::NotConfigured("video search").to_string(),
            "not configured: video search"
        );
        assert_eq!(
            PaginationError::InvalidArgument {
                page: 0,
                page_size: 12
            }
            .to_string(),
            "page and page size must be 1 or greater (page 0, page size 12)"
        );
    }
}
