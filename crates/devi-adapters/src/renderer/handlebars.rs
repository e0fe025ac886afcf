//! Handlebars-backed renderer.
//!
//! Content goes through the literal token pass, then Handlebars over the
//! substitution context (`#if`, `#unless`, `#each`, `#with`), then the escape
//! markers. Output is never HTML-escaped.
//!
//! Handlebars never sees token values or unresolved references: both are
//! shelved behind private-use placeholders before the pass and put back
//! afterwards, so a value containing `{{` stays data and an unknown
//! `{{ missing }}`, `{{{missing}}}` or `\{{missing}}` comes out as written.

use devi_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{Delimiter, EscapeMarkers, SubstitutionMap},
    error::DeviResult,
};
use handlebars::Handlebars;
use tracing::{debug, instrument};

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    delimiter: Delimiter,
    markers: EscapeMarkers,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("helperMissing", Box::new(preserve_unknown_helper));

        Self {
            registry,
            delimiter: Delimiter::default(),
            markers: EscapeMarkers::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_markers(mut self, markers: EscapeMarkers) -> Self {
        self.markers = markers;
        self
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(bytes = content.len()))]
    fn render(&self, content: &str, substitutions: &SubstitutionMap) -> DeviResult<String> {
        let mut shelf = Shelf::default();
        let substituted = substitutions
            .tokens()
            .iter()
            .fold(content.to_owned(), |acc, (key, value)| {
                self.delimiter.replace_all(&acc, key, &shelf.stash(value))
            });
        let guarded = shelve_unresolved(&substituted, substitutions, &mut shelf);

        let rendered = self
            .registry
            .render_template(&guarded, &substitutions.to_context())
            .map_err(|e| {
                debug!(error = %e, "Handlebars pass failed");
                ApplicationError::RenderingFailed {
                    reason: e.to_string(),
                }
            })?;
        Ok(self.markers.apply(&shelf.restore(&rendered)))
    }
}

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Text kept away from Handlebars, addressed by placeholder index.
#[derive(Default)]
struct Shelf(Vec<String>);

impl Shelf {
    fn stash(&mut self, text: &str) -> String {
        let placeholder = format!("{OPEN}{}{CLOSE}", self.0.len());
        self.0.push(text.to_owned());
        placeholder
    }

    fn restore(&self, rendered: &str) -> String {
        let mut out = String::with_capacity(rendered.len());
        let mut rest = rendered;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];
            let shelved = after.find(CLOSE).and_then(|end| {
                let text = after[..end].parse::<usize>().ok().and_then(|i| self.0.get(i))?;
                Some((end, text))
            });
            match shelved {
                Some((end, text)) => {
                    out.push_str(text);
                    rest = &after[end + CLOSE.len_utf8()..];
                }
                None => {
                    out.push(OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Shelve every `{{path}}` the context cannot resolve, in whatever form it
/// was written, plus the backslash of `\{{`, which Handlebars would eat.
///
/// Inside `#each` and `#with` paths resolve against the block's value, so
/// there the decision is left to [`preserve_unknown_helper`].
fn shelve_unresolved(content: &str, substitutions: &SubstitutionMap, shelf: &mut Shelf) -> String {
    let mut out = String::with_capacity(content.len());
    let mut scopes: Vec<bool> = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let (before, tail) = rest.split_at(start);
        let Some(end) = tail.find("}}") else {
            break;
        };
        let mut span_end = end + 2;
        if tail.starts_with("{{{") && tail[span_end..].starts_with('}') {
            span_end += 1;
        }
        let span = &tail[..span_end];

        match before.strip_suffix('\\') {
            Some(before) => {
                out.push_str(before);
                out.push_str(&shelf.stash("\\"));
            }
            None => out.push_str(before),
        }

        let body = span
            .trim_start_matches('{')
            .trim_end_matches('}')
            .trim_matches(|c: char| c == '~' || c.is_whitespace());
        match body.chars().next() {
            Some('#' | '^') if body.len() > 1 => {
                let helper = body[1..].split_whitespace().next().unwrap_or_default();
                scopes.push(matches!(helper, "each" | "with"));
                out.push_str(span);
            }
            Some('/') => {
                scopes.pop();
                out.push_str(span);
            }
            _ if !scopes.contains(&true)
                && is_plain_path(body)
                && substitutions.lookup(body).is_none() =>
            {
                out.push_str(&shelf.stash(span));
            }
            _ => out.push_str(span),
        }
        rest = &tail[span_end..];
    }

    out.push_str(rest);
    out
}

fn is_plain_path(body: &str) -> bool {
    !body.is_empty()
        && body != "else"
        && body
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '@'))
}

/// Writes `{{name params}}` back for anything not in the block's context.
fn preserve_unknown_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let mut expression = h.name().to_string();
    for param in h.params() {
        expression.push(' ');
        match param.relative_path() {
            Some(path) => expression.push_str(path),
            None => expression.push_str(&param.value().to_string()),
        }
    }
    out.write("{{")?;
    out.write(&expression)?;
    out.write("}}")?;
    Ok(())
}
