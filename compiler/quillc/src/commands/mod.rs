//! The `render`, `canon` and `check` commands.

use std::collections::BTreeMap;

use quill_eval::diagnostics::render;
use quill_eval::{Configuration, Model, Template};

/// Options accepted by `quill render`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// `--set name=value` pairs, in command-line order.
    pub data: Vec<(String, Model)>,
    /// `--max-depth N`
    pub max_depth: Option<usize>,
}

impl RenderOptions {
    /// Parse the arguments following the file path.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = RenderOptions::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--set" => {
                    let pair = args.next().ok_or("--set needs name=value")?;
                    options.data.push(parse_assignment(pair)?);
                }
                "--max-depth" => {
                    let depth = args.next().ok_or("--max-depth needs a number")?;
                    options.max_depth = Some(
                        depth
                            .parse()
                            .map_err(|_| format!("invalid --max-depth '{depth}'"))?,
                    );
                }
                other => {
                    if let Some(pair) = other.strip_prefix("--set=") {
                        options.data.push(parse_assignment(pair)?);
                    } else {
                        return Err(format!("unknown option '{other}'"));
                    }
                }
            }
        }
        Ok(options)
    }

    /// The data model hash; later `--set`s win.
    pub fn data_model(&self) -> Model {
        let entries: BTreeMap<String, Model> = self.data.iter().cloned().collect();
        Model::hash(entries)
    }

    pub fn configuration(&self) -> Configuration {
        let builder = Configuration::builder();
        match self.max_depth {
            Some(depth) => builder.max_call_depth(depth).build(),
            None => builder.build(),
        }
    }
}

fn parse_assignment(pair: &str) -> Result<(String, Model), String> {
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{pair}'"))?;
    if name.is_empty() {
        return Err(format!("missing name in '{pair}'"));
    }
    Ok((name.to_string(), parse_value(value)))
}

/// Integer, float or boolean when the text reads as one, otherwise a string.
pub fn parse_value(text: &str) -> Model {
    if let Ok(n) = text.parse::<i64>() {
        return Model::Int(n);
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() {
            return Model::Float(f);
        }
    }
    match text {
        "true" => Model::Bool(true),
        "false" => Model::Bool(false),
        _ => Model::from(text),
    }
}

/// Parse and run `text`, returning its output or a rendered report.
pub fn render_source(name: &str, text: &str, options: &RenderOptions) -> Result<String, String> {
    let config = options.configuration();
    tracing::debug!(template = name, vars = options.data.len(), "rendering");
    let template = Template::parse(name, text, &config).map_err(|err| err.render())?;
    template
        .render(options.data_model())
        .map_err(|err| render(&err))
}

/// Canonical form of `text`, or a rendered parse error.
pub fn canon_source(name: &str, text: &str) -> Result<String, String> {
    Template::parse(name, text, &Configuration::default())
        .map(|template| template.canonical_form())
        .map_err(|err| err.render())
}

/// Parse only; reports how many callables were defined.
pub fn check_source(name: &str, text: &str) -> Result<String, String> {
    let template =
        Template::parse(name, text, &Configuration::default()).map_err(|err| err.render())?;
    let count = template.macros().len();
    Ok(format!(
        "{name}: ok ({count} macro{})",
        if count == 1 { "" } else { "s" }
    ))
}

/// Read a source file, exiting with a message on failure.
pub fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
