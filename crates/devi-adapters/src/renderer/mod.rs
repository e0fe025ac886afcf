//! Content renderers.
//!
//! Both renderers run the literal token pass first and the escape markers
//! last; [`HandlebarsRenderer`] adds a templating pass in between.

mod handlebars;
mod simple;

pub use self::handlebars::HandlebarsRenderer;
pub use self::simple::SimpleRenderer;
