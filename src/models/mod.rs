pub mod article;
pub mod sentiment;
pub mod run;

pub use article::*;
pub use sentiment::*;
pub use run::*;
