use crate::sector::ItemId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu has no sectors")]
    Empty,
    #[error("no sector with id {0}")]
    UnknownItem(ItemId),
    #[error("menu has not been assigned a size yet")]
    NotSized,
}
