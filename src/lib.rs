//! kiln is a configuration-driven file materialization engine.
//! It renders or copies template artifacts into a project folder, inserts content at
//! needles left in already generated files, and optionally commits the result to git.

/// Command-line interface module for the kiln application
pub mod cli;

/// Well-known configuration keys, defaults, validation and description loading
pub mod config;

/// Common constants: template suffix, marker files, needles
pub mod constants;

/// Error types and handling for the kiln application
pub mod error;

/// Ordered generation steps wrapped by optional git init and commit
pub mod generator;

/// Repository init, commit and patch application
pub mod git;

/// Template root resolution by namespace and filename
pub mod loader;

/// Copy, render, write and replace operations on the project tree
pub mod materializer;

/// Needle based insertion into generated files
pub mod needle;

/// package.json mutation and npm commands
pub mod npm;

/// The project folder and its write-once configuration
pub mod project;

/// Needle based insertion into `.properties` files
pub mod properties;

/// Template rendering against the project configuration
pub mod renderer;

/// Pinned dependency version table
pub mod versions;
