//! Developer Experience features
//!
//! Turns the configured integration into things a developer can paste:
//!
//! - **Review rendering**: summary, request preview and mapping table
//! - **Code Generation**: JavaScript, Python, PHP and Ruby snippets
//! - **Curl Generation**: an equivalent curl command
//!
//! ```bash
//! hrbridge render 1 --language python --language curl
//! ```

pub mod codegen;
pub mod curl;
pub mod render;

pub use codegen::{generate_code, Language};
pub use curl::generate_curl_command;
pub use render::{render, RenderOptions, Rendered};
