//! EcoSphere signup
//!
//! 多角色分步注册流程：命令行入口、依赖装配与终端适配器。

pub mod answers;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod terminal;

pub use answers::Answers;
pub use cli::{Cli, Commands};
