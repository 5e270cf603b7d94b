//! コマンドラインインターフェース

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Command, OutputFormat, RenderArgs};
pub use commands::run;
