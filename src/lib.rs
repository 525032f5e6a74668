pub mod analyzers;
pub mod bookmarks;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod proxy;
pub mod records;
pub mod session;
