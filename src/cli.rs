//! Minimal CLI: sample type → catalog JSON, catalog JSON → Markdown
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use field_catalog::{render, samples, Catalog, CatalogOptions, EmptyComposites};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// emit flat field catalogs of nested types, or render catalogs as Markdown
#[derive(Parser, Debug)]
#[command(name = "field-catalog")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list the built-in sample types
    List,
    /// print the JSON catalog of a sample type
    Catalog(CatalogOut),
    /// render catalog JSON files as Markdown tables
    Render(RenderOut),
}

#[derive(Args, Debug, Clone)]
struct OptionSettings {
    /// JSON file with catalog options (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// maximum nesting depth before giving up
    #[arg(long)]
    max_depth: Option<usize>,

    /// drop composites that declare no fields
    #[arg(long, default_value_t = false)]
    skip_empty: bool,
}

#[derive(clap::Parser, Debug)]
struct CatalogOut {
    #[command(flatten)]
    option_settings: OptionSettings,

    /// sample type name (see `list`)
    #[arg(long = "type", short = 't')]
    type_name: String,

    /// keep only fields whose name matches this regex
    #[arg(long)]
    filter: Option<String>,

    /// pretty-print the JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    /// One or more catalog files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output .md file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OptionSettings {
    fn resolve(&self) -> Result<CatalogOptions> {
        let mut options = match self.config.as_ref() {
            Some(path) => CatalogOptions::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CatalogOptions::default(),
        };
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        if self.skip_empty {
            options.empty_composites = EmptyComposites::Skip;
        }
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::List => {
                for (name, shape) in samples::REGISTRY {
                    println!("{name}\t{}", shape().type_name);
                }
                Ok(())
            }
            Command::Catalog(target) => {
                let options = target.option_settings.resolve()?;
                let shape = samples::lookup(&target.type_name).ok_or_else(|| {
                    anyhow!("unknown type `{}` (try `field-catalog list`)", target.type_name)
                })?;

                let mut fields = Catalog::with_options(options).fields_of(&shape)?;
                if let Some(pattern) = target.filter.as_ref() {
                    fields = render::filter_by_name(fields, pattern)?;
                }
                info!(type_name = %shape.type_name, fields = fields.len(), "catalog ready");

                let src = if target.pretty {
                    serde_json::to_string_pretty(&fields)?
                } else {
                    serde_json::to_string(&fields)?
                };
                write_output(target.out.as_deref(), &src)
            }
            Command::Render(target) => {
                let paths = resolve_file_path_patterns(&target.input)?;
                let mut doc = String::new();
                for path in &paths {
                    let src = std::fs::read_to_string(path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let fields = render::load_catalog(&src)
                        .with_context(|| format!("decoding {}", path.display()))?;
                    info!(path = %path.display(), fields = fields.len(), "rendering");
                    if paths.len() > 1 {
                        doc.push_str(&format!("## {}\n\n", path.display()));
                    }
                    doc.push_str(&render::markdown(&fields));
                    doc.push('\n');
                }
                write_output(target.out.as_deref(), doc.trim_end())
            }
        }
    }
}

pub fn report(error: &anyhow::Error) {
    eprintln!("{} {error:#}", "error:".red().bold());
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("writing {}", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
