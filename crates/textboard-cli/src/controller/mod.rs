pub mod article;
pub mod system;

pub use article::ArticleController;
