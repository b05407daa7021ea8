use std::fmt;

#[derive(Debug)]
pub enum BundleError {
    MissingReference(String),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::MissingReference(tag) => {
                write!(f, "shell does not contain expected tag: {tag}")
            }
        }
    }
}

impl std::error::Error for BundleError {}
