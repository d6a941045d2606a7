//! lang-publisher
//!
//! ベンダーパッケージの翻訳ファイルをアプリケーションへ公開し、
//! 再公開時には新しいキーだけをマージする。

pub mod cli;
pub mod comparator;
pub mod config;
pub mod document;
pub mod error;
pub mod paths;
pub mod processor;
pub mod publisher;
mod test_utils;

pub use comparator::{
    MergeMode,
    merge,
};
pub use document::Document;
pub use error::PublishError;
pub use publisher::Publisher;
