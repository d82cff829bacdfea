use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use revdiff_diff::{diff_documents, flatten, group_hunks, Hunk};
use revdiff_remote::{adapt_response, Comparator, DiffQuery, InMemoryRevisions, ServerDiffResponse};
use revdiff_render::{render, ColorMode, DiffStats, RenderConfig, TerminalRenderer};
use revdiff_types::{DocumentInput, EditScript, Line, RevisionRef, WikiRevision};
use serde_json::json;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let out = execute(&cli)?;
    print!("{out}");
    Ok(())
}

/// Run a command and return what it prints.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    let mut config = CliConfig::load(cli.config.as_deref(), &cwd)?;
    if cli.no_color {
        config.render.color = ColorMode::Off;
    }
    debug!(?config, "loaded configuration");

    match &cli.command {
        Command::Flatten(args) => cmd_flatten(args, cli.format),
        Command::Diff(args) => cmd_diff(args, &config, cli.format),
        Command::Hunks(args) => cmd_hunks(args, &config, cli.format),
        Command::Adapt(args) => cmd_adapt(args, &config, cli.format),
        Command::Compare(args) => cmd_compare(args, &config, cli.format),
    }
}

fn cmd_flatten(args: &FlattenArgs, format: OutputFormat) -> anyhow::Result<String> {
    let input = load_input(&args.path)?;
    let lines = flatten(input.nodes());
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&lines)?)),
        OutputFormat::Text => Ok(lines.iter().map(|l| format!("{l}\n")).collect()),
    }
}

fn cmd_diff(args: &DiffArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<String> {
    let left = load_input(&args.left)?;
    let right = load_input(&args.right)?;
    let script = diff_documents(left.nodes(), right.nodes());

    let labels = (
        args.view.left_label.clone().or_else(|| revision_label(&left)),
        args.view.right_label.clone().or_else(|| revision_label(&right)),
    );
    present(Some(&script), &view_config(config, &args.view, labels), format)
}

fn cmd_hunks(args: &HunksArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<String> {
    let left = load_input(&args.left)?;
    let right = load_input(&args.right)?;
    let script = diff_documents(left.nodes(), right.nodes());
    let hunks = group_hunks(&script, args.context.unwrap_or(config.context));

    match format {
        OutputFormat::Json => {
            let response = ServerDiffResponse::from_hunks(&hunks);
            Ok(format!("{}\n", serde_json::to_string_pretty(&response)?))
        }
        OutputFormat::Text => Ok(hunks
            .iter()
            .map(|h| paint_hunk(h, config.render.color))
            .collect()),
    }
}

fn cmd_adapt(args: &AdaptArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<String> {
    let body = std::fs::read_to_string(&args.response)
        .with_context(|| format!("cannot read response {}", args.response.display()))?;
    let base = match &args.base {
        Some(path) => Some(flatten(load_input(path)?.nodes())),
        None => None,
    };
    let script = adapt_response(&body, base.as_deref());
    present(script.as_ref(), &view_config(config, &args.view, (None, None)), format)
}

fn cmd_compare(args: &CompareArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<String> {
    let store = load_history(&args.history)?;
    let current = store.current_number(&args.title)?;
    let base: Option<Vec<Line>> = if args.hunks_only {
        None
    } else {
        Some(flatten(store.revision(&args.title, args.left)?.nodes()))
    };
    let query = DiffQuery::new(args.title.clone(), args.left, args.right)
        .with_context(args.context.unwrap_or(config.context));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    let comparator = Comparator::new();
    let script = runtime.block_on(comparator.compare_remote(&store, &query, base.as_deref()));

    let labels = (
        Some(args.left.label(Some(current))),
        Some(args.right.label(Some(current))),
    );
    present(script.as_ref(), &view_config(config, &args.view, labels), format)
}

fn present(
    script: Option<&EditScript>,
    config: &RenderConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rendered = render(script, config.layout, &config.left_label, &config.right_label);
    let stats = script.map(DiffStats::from_script);
    match format {
        OutputFormat::Json => {
            let value = json!({ "diff": rendered, "stats": stats });
            Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
        }
        OutputFormat::Text if script.is_none() => Ok("No comparison available.\n".into()),
        OutputFormat::Text => Ok(TerminalRenderer::new(config).render(&rendered, stats)),
    }
}

/// Merge command-line view flags over the configured defaults.
fn view_config(
    config: &CliConfig,
    view: &ViewArgs,
    labels: (Option<String>, Option<String>),
) -> RenderConfig {
    let mut render = config.render.clone();
    if let Some(layout) = view.layout {
        render.layout = layout;
    }
    if let Some(left) = labels.0 {
        render.left_label = left;
    }
    if let Some(right) = labels.1 {
        render.right_label = right;
    }
    if view.stats {
        render.show_stats = true;
    }
    if view.no_stats {
        render.show_stats = false;
    }
    render
}

fn revision_label(input: &DocumentInput) -> Option<String> {
    input
        .revision_number()
        .map(|n| RevisionRef::Number(n).label(None))
}

fn load_input(path: &Path) -> anyhow::Result<DocumentInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    DocumentInput::from_json(&text).with_context(|| format!("cannot parse {}", path.display()))
}

fn load_history(path: &Path) -> anyhow::Result<InMemoryRevisions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read history {}", path.display()))?;
    let revisions: Vec<WikiRevision> = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse history {}", path.display()))?;
    let store = InMemoryRevisions::new();
    for revision in revisions {
        store.insert_revision(revision)?;
    }
    Ok(store)
}

fn paint_hunk(hunk: &Hunk, color: ColorMode) -> String {
    hunk.to_string()
        .lines()
        .map(|line| {
            let painted = match (color, line.chars().next()) {
                (ColorMode::Off, _) => line.to_string(),
                (_, Some('@')) => line.cyan().to_string(),
                (_, Some('+')) => line.green().to_string(),
                (_, Some('-')) => line.red().to_string(),
                _ => line.to_string(),
            };
            format!("{painted}\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("revdiff.toml"), "").unwrap();
            Self { dir }
        }

        fn write(&self, name: &str, body: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, body).unwrap();
            path
        }

        fn run(&self, args: &[&str]) -> anyhow::Result<String> {
            let config = self.dir.path().join("revdiff.toml");
            let mut argv = vec!["revdiff", "--no-color", "--config", config.to_str().unwrap()];
            argv.extend_from_slice(args);
            execute(&Cli::try_parse_from(argv).unwrap())
        }
    }

    fn doc(lines: &[&str]) -> String {
        let content: Vec<_> = lines
            .iter()
            .map(|l| json!({ "type": "paragraph", "content": [{ "type": "text", "text": l }] }))
            .collect();
        json!({ "type": "doc", "content": content }).to_string()
    }

    fn page(number: u64, lines: &[&str]) -> serde_json::Value {
        let content: serde_json::Value = serde_json::from_str(&doc(lines)).unwrap();
        json!({
            "meta": {
                "id": "p1",
                "title": "Campus",
                "created_at": "2024-03-01T09:00:00Z",
                "updated_at": "2024-03-01T09:00:00Z",
                "author_id": "u1",
                "current_rev": format!("r{number}"),
                "current_rev_number": number,
            },
            "content": content,
        })
    }

    #[test]
    fn flatten_prints_lines() {
        let fx = Fixture::new();
        let path = fx.write(
            "doc.json",
            r#"[ { "type": "heading", "content": [ { "type": "text", "text": "Title" } ] },
                 { "type": "image", "attrs": { "alt": "map", "src": "m.png" } } ]"#,
        );
        let out = fx.run(&["flatten", path.to_str().unwrap()]).unwrap();
        assert_eq!(out, "Title\n[image] map m.png\n");
    }

    #[test]
    fn diff_inline_with_stats() {
        let fx = Fixture::new();
        let a = fx.write("a.json", &doc(&["a", "b", "c"]));
        let b = fx.write("b.json", &doc(&["a", "x", "c"]));
        let out = fx
            .run(&["diff", a.to_str().unwrap(), b.to_str().unwrap()])
            .unwrap();
        assert_eq!(out, "a\n- b\n+ x\nc\n+1 -1 =2\n");
    }

    #[test]
    fn diff_split_uses_revision_labels() {
        let fx = Fixture::new();
        let a = fx.write("a.json", &page(2, &["a"]).to_string());
        let b = fx.write("b.json", &page(5, &["a"]).to_string());
        let out = fx
            .run(&[
                "diff",
                a.to_str().unwrap(),
                b.to_str().unwrap(),
                "--layout",
                "split",
                "--no-stats",
            ])
            .unwrap();
        assert!(out.lines().next().unwrap().starts_with("v2 "));
        assert!(out.lines().next().unwrap().ends_with("│ v5"));
    }

    #[test]
    fn diff_json_mirrors_rows() {
        let fx = Fixture::new();
        let a = fx.write("a.json", &doc(&["a"]));
        let b = fx.write("b.json", &doc(&["b"]));
        let out = fx
            .run(&["--format", "json", "diff", a.to_str().unwrap(), b.to_str().unwrap()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["diff"]["layout"], "inline");
        assert_eq!(value["diff"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["stats"]["additions"], 1);
    }

    #[test]
    fn hunks_then_adapt_round_trip() {
        let fx = Fixture::new();
        let a = fx.write("a.json", &doc(&["a", "b", "c", "d", "e", "f", "g"]));
        let b = fx.write("b.json", &doc(&["a", "b", "c", "X", "e", "f", "g"]));
        let json = fx
            .run(&["--format", "json", "hunks", a.to_str().unwrap(), b.to_str().unwrap(), "-U", "1"])
            .unwrap();
        let response = fx.write("response.json", &json);

        let out = fx
            .run(&["adapt", response.to_str().unwrap(), "--base", a.to_str().unwrap(), "--no-stats"])
            .unwrap();
        assert_eq!(out, "a\nb\nc\n- d\n+ X\ne\nf\ng\n");

        let window = fx
            .run(&["adapt", response.to_str().unwrap(), "--no-stats"])
            .unwrap();
        assert_eq!(window, "c\n- d\n+ X\ne\n");
    }

    #[test]
    fn hunks_text_output() {
        let fx = Fixture::new();
        let a = fx.write("a.json", &doc(&["a", "b"]));
        let b = fx.write("b.json", &doc(&["a", "c"]));
        let out = fx
            .run(&["hunks", a.to_str().unwrap(), b.to_str().unwrap()])
            .unwrap();
        assert_eq!(out, "@@ -1,2 +1,2 @@\n a\n-b\n+c\n");
    }

    #[test]
    fn unusable_response_renders_nothing() {
        let fx = Fixture::new();
        let response = fx.write("response.json", "{ not json");
        let out = fx.run(&["adapt", response.to_str().unwrap()]).unwrap();
        assert_eq!(out, "No comparison available.\n");
    }

    #[test]
    fn compare_from_history() {
        let fx = Fixture::new();
        let history = json!([page(1, &["a", "b"]), page(2, &["a", "c", "d"])]);
        let path = fx.write("history.json", &history.to_string());
        let out = fx
            .run(&[
                "compare",
                path.to_str().unwrap(),
                "--title",
                "Campus",
                "--left",
                "1",
                "--layout",
                "split",
                "--no-stats",
            ])
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("v1 "));
        assert!(lines[0].ends_with("│ v2"));
        assert_eq!(lines.len(), 2 + 4);
    }

    #[test]
    fn missing_file_is_reported() {
        let fx = Fixture::new();
        let err = fx.run(&["flatten", "/definitely/not/here.json"]).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
