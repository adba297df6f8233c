// Chart DSL Parser Module

pub mod ast;
pub mod bars;
pub mod colors;
pub mod errorbar;
pub mod labels;
pub mod lexer;
pub mod pipeline;
pub mod points;
pub mod theme;

// Public API re-exports
pub use ast::ChartSpec;
pub use pipeline::parse_chart_spec;
