pub mod article;
pub mod article_index;
pub mod block;

pub use article::*;
pub use article_index::*;
pub use block::*;
