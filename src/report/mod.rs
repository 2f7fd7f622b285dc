pub mod dashboard;
pub mod render;

pub use dashboard::{ChartBar, Dashboard};
pub use render::{format_html, format_markdown, format_text, render};
