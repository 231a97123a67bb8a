//! MCP server module exposing portfolio project generation to AI assistants.
//!
//! Provides an MCP (Model Context Protocol) server over stdio for
//! integration with tools like Claude Code, Cursor, and VS Code.

pub mod server;

pub use server::PortfolioForgeServer;
