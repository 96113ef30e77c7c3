pub mod metrics;
pub mod wikipedia;

pub use metrics::{get_metrics, init_metrics};
pub use wikipedia::{Article, ArticleSource, SourceError, WikipediaClient};
