mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use eng_toolchain_config::Config;
use eng_toolchain_core::{
    Dialect, Document, FsLoader, compile_document, parse_str, to_pretty_json, tokenize,
    tokens_to_pretty_json,
};
use eng_toolchain_diagnostics::{self as diag, Diagnostic, codes};

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "eng",
    version,
    about = "ENG toolchain: compile .heng pages to HTML, .seng scripts to JavaScript, and .ceng styles to CSS"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_enum)]
    output: Option<Format>,

    /// Settings file. When omitted, `eng.json` next to the input is used
    /// if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compile a .heng page to HTML, inlining its .seng and .ceng imports.
    Build {
        file: PathBuf,
        /// Where to write the page. Defaults to the input with `.html`.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },
    /// Transpile a .seng file to JavaScript.
    Seng {
        file: PathBuf,
        /// Where to write the script. Defaults to the input with `.js`.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
        /// Print the script instead of writing it.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Rewrite a .ceng file to CSS.
    Ceng {
        file: PathBuf,
        /// Where to write the stylesheet. Defaults to the input with `.css`.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
        /// Print the stylesheet instead of writing it.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Print the token stream of a .heng file as JSON.
    Tokens { file: PathBuf },
    /// Parse a .heng file and print its syntax tree as JSON.
    Ast { file: PathBuf },
    /// Explain a diagnostic ID (e.g., ENG2001).
    Explain { id: String },
}

// ── Entry point ─────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output);

    match cli.cmd {
        Cmd::Build { file, out } => cmd_build(&file, out.as_deref(), cli.config.as_deref(), format),
        Cmd::Seng { file, out, stdout } => {
            cmd_dialect(Dialect::Seng, &file, out.as_deref(), stdout, format)
        }
        Cmd::Ceng { file, out, stdout } => {
            cmd_dialect(Dialect::Ceng, &file, out.as_deref(), stdout, format)
        }
        Cmd::Tokens { file } => cmd_tokens(&file),
        Cmd::Ast { file } => cmd_ast(&file, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ── Command implementations ─────────────────────────────────────────────

fn cmd_build(file: &Path, out: Option<&Path>, config: Option<&Path>, format: Format) -> Result<()> {
    if file.extension().is_none_or(|ext| ext != "heng") {
        bail!("expected a .heng file, got {}", file.display());
    }
    let source = read_source(file)?;
    let base = base_dir(file);
    let config = load_config(config, base)?;
    let filename = file.display().to_string();

    let compilation = match compile_document(&source, base, &FsLoader, &config) {
        Ok(c) => c,
        Err(e) => {
            let diagnostics = vec![e.to_diagnostic()];
            match format {
                Format::Json => print_json(&serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                    "diagnostics": diagnostics,
                }))?,
                Format::Pretty => {
                    render_diagnostics(&source, &filename, &diagnostics);
                    print_summary(&diagnostics);
                }
            }
            exit_on_errors(&diagnostics);
            return Ok(());
        }
    };

    let out = out.map_or_else(|| file.with_extension("html"), Path::to_path_buf);
    fs::write(&out, &compilation.html)
        .with_context(|| format!("failed to write {}", out.display()))?;

    let mut diagnostics = compilation.diagnostics;
    let sidecars = if config.emit_sidecars {
        write_sidecars(&compilation.document, base, &mut diagnostics)
    } else {
        Vec::new()
    };

    match format {
        Format::Json => print_json(&serde_json::json!({
            "success": true,
            "output": out.display().to_string(),
            "sidecars": sidecars.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "diagnostics": diagnostics,
        }))?,
        Format::Pretty => {
            render_diagnostics(&source, &filename, &diagnostics);
            print_summary(&diagnostics);
            eprintln!("compiled {} -> {}", file.display(), out.display());
            for sidecar in &sidecars {
                eprintln!("  wrote {}", sidecar.display());
            }
        }
    }
    Ok(())
}

/// Write each inlined dialect import next to its source. Failures become
/// warnings; the page itself is already written.
fn write_sidecars(document: &Document, base: &Path, diagnostics: &mut Vec<Diagnostic>) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for import in document.imports() {
        let (Some(path), Some(compiled), Some(dialect)) =
            (import.path.as_deref(), import.compiled.as_deref(), import.dialect())
        else {
            continue;
        };
        let target = dialect.sidecar_path(&base.join(path));
        match fs::write(&target, compiled) {
            Ok(()) => written.push(target),
            Err(e) => diagnostics.push(Diagnostic::warn(
                codes::SIDECAR_WRITE_FAILED,
                format!("could not write {}: {e}", target.display()),
                Some(import.span),
            )),
        }
    }
    written
}

fn cmd_dialect(
    dialect: Dialect,
    file: &Path,
    out: Option<&Path>,
    stdout: bool,
    format: Format,
) -> Result<()> {
    let source = read_source(file)?;
    let compiled = dialect.compile(&source);
    if stdout {
        print!("{compiled}");
        return Ok(());
    }

    let out = out.map_or_else(|| dialect.sidecar_path(file), Path::to_path_buf);
    if out == file {
        bail!("refusing to overwrite the input file {}", file.display());
    }
    fs::write(&out, &compiled).with_context(|| format!("failed to write {}", out.display()))?;

    match format {
        Format::Json => print_json(&serde_json::json!({
            "success": true,
            "dialect": dialect,
            "output": out.display().to_string(),
        }))?,
        Format::Pretty => eprintln!("compiled {} -> {}", file.display(), out.display()),
    }
    Ok(())
}

fn cmd_tokens(file: &Path) -> Result<()> {
    let source = read_source(file)?;
    println!("{}", tokens_to_pretty_json(&tokenize(&source)));
    Ok(())
}

fn cmd_ast(file: &Path, format: Format) -> Result<()> {
    let source = read_source(file)?;
    let (document, diagnostics) = match parse_str(&source) {
        Ok(doc) => (Some(doc), Vec::new()),
        Err(e) => (None, vec![e.to_diagnostic()]),
    };

    match format {
        Format::Json => print_json(&serde_json::json!({
            "ast": document,
            "diagnostics": diagnostics,
        }))?,
        Format::Pretty => {
            if let Some(doc) = &document {
                println!("{}", to_pretty_json(doc));
            }
            render_diagnostics(&source, &file.display().to_string(), &diagnostics);
            print_summary(&diagnostics);
        }
    }
    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&serde_json::json!({
            "id": id,
            "explanation": diag::explain(id),
        }))?,
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diag::has_errors(diagnostics) {
        process::exit(1);
    }
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Imports resolve relative to the page's directory.
fn base_dir(file: &Path) -> &Path {
    file.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    match explicit {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Config::discover(dir).context("failed to load eng.json"),
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
