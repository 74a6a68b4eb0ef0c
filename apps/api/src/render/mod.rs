// Markdown-subset rendering and the JSON view models built on it.

pub mod markdown;
pub mod views;
