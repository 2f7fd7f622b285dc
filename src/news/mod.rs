pub mod source;
pub mod gnews;

pub use source::NewsSource;
pub use gnews::GNewsClient;
