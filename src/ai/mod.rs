//! Natural-language-to-SQL translation via a hosted chat-completion model.

pub mod client;
pub mod translator;

pub use client::ChatClient;
pub use translator::SqlTranslator;
