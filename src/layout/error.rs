use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout root `{root}` is not a node of the graph")]
    InvalidRoot { root: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
