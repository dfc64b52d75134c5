use crate::infrastructure::edge_list_reader::read_edge_list_file;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDecomposer;
use crate::infrastructure::serde_json_adapter::{report_to_json, write_output, write_report_file};
use crate::usecase::decompose::{decompose_edge_list, DecomposeOptions};
use crate::usecase::event::AppEvent;
use crate::usecase::report::{DetailPolicy, SccReport};
use crate::usecase::verify::verify_decomposition;
use anyhow::{anyhow, Context, Result};
use std::env;
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::Decompose {
            input,
            output,
            format,
            detail,
            max_nodes,
            emit_events,
            verify,
        } => {
            if emit_events && output.is_none() {
                return Err(anyhow!(
                    "--emit-events requires --out (events and report both write to stdout)"
                ));
            }

            let dto = read_edge_list_file(&input)
                .await
                .with_context(|| format!("reading edge list: {input}"))?;

            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let options = DecomposeOptions { max_nodes };
            let result = decompose_edge_list(dto, &KosarajuSccDecomposer, &options, Some(tx)).await;

            // Drain queued events before any error propagates.
            if let Some(handle) = printer {
                handle.await.ok();
            }
            let outcome = result.with_context(|| format!("decomposing: {input}"))?;

            if verify {
                verify_decomposition(&outcome.graph, &outcome.scc)
                    .with_context(|| format!("verifying decomposition: {input}"))?;
            }

            let report = SccReport::build(&outcome.scc, outcome.stats.clone(), detail);
            match (format, output.as_deref()) {
                (OutputFormat::Json, Some(path)) => write_report_file(path, &report).await?,
                (OutputFormat::Json, None) => {
                    let mut body = report_to_json(&report)?;
                    body.push('\n');
                    write_output(None, &body).await?;
                }
                (OutputFormat::Text, path) => write_output(path, &report.render_text()).await?,
            }

            let stats = &outcome.stats;
            eprintln!(
                "summary: nodes={} edges={} components={} cyclic_components={} largest_component={}",
                stats.nodes,
                stats.edges,
                stats.components,
                stats.cyclic_components,
                stats.largest_component
            );

            Ok(())
        }

        Cli::Validate { input, max_nodes } => {
            let dto = read_edge_list_file(&input)
                .await
                .with_context(|| format!("reading edge list: {input}"))?;

            let options = DecomposeOptions { max_nodes };
            let outcome = decompose_edge_list(dto, &KosarajuSccDecomposer, &options, None)
                .await
                .with_context(|| format!("decomposing: {input}"))?;
            verify_decomposition(&outcome.graph, &outcome.scc)
                .with_context(|| format!("verifying decomposition: {input}"))?;

            eprintln!(
                "ok: {} nodes, {} edges, {} components verified",
                outcome.stats.nodes, outcome.stats.edges, outcome.stats.components
            );
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug)]
enum Cli {
    Decompose {
        input: String,
        output: Option<String>,
        format: OutputFormat,
        detail: DetailPolicy,
        max_nodes: Option<usize>,
        emit_events: bool,
        verify: bool,
    },
    Validate {
        input: String,
        max_nodes: Option<usize>,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> scc decompose --in <edges.txt> [--format text|json] [--out <file>] [--detail auto|always|never] [--max-nodes N] [--emit-events] [--verify]
        // <bin> scc validate --in <edges.txt> [--max-nodes N]
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "scc" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "decompose" => Self::parse_decompose(args),
            "validate" => Self::parse_validate(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_decompose(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        let mut format = OutputFormat::Text;
        let mut detail = DetailPolicy::Auto;
        let mut max_nodes: Option<usize> = None;
        let mut emit_events = false;
        let mut verify = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = args.get(i).cloned();
                }
                "--format" => {
                    i += 1;
                    format = match args.get(i).map(String::as_str) {
                        Some("text") => OutputFormat::Text,
                        Some("json") => OutputFormat::Json,
                        other => {
                            return Err(anyhow!(format!(
                                "invalid --format: {}\n\n{}",
                                other.unwrap_or("<missing>"),
                                usage()
                            )))
                        }
                    };
                }
                "--detail" => {
                    i += 1;
                    let raw = args
                        .get(i)
                        .ok_or_else(|| anyhow!(format!("missing --detail value\n\n{}", usage())))?;
                    detail = raw.parse()?;
                }
                "--max-nodes" => {
                    i += 1;
                    max_nodes = Some(parse_max_nodes(args.get(i))?);
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "--verify" => {
                    verify = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::Decompose {
            input,
            output,
            format,
            detail,
            max_nodes,
            emit_events,
            verify,
        })
    }

    fn parse_validate(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut max_nodes: Option<usize> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--max-nodes" => {
                    i += 1;
                    max_nodes = Some(parse_max_nodes(args.get(i))?);
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::Validate { input, max_nodes })
    }
}

fn parse_max_nodes(raw: Option<&String>) -> Result<usize> {
    let raw = raw.ok_or_else(|| anyhow!(format!("missing --max-nodes value\n\n{}", usage())))?;
    raw.parse::<usize>()
        .with_context(|| format!("invalid --max-nodes: {raw}"))
}

fn usage() -> &'static str {
    "Usage:\n  scc decompose --in/--input <edges.txt> [--format text|json] [--out/--output <file>] [--detail auto|always|never] [--max-nodes N] [--emit-events] [--verify]\n  scc validate --in/--input <edges.txt> [--max-nodes N]\n\nInput:\n  First line is the node count; each following line is one directed edge `from to`.\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout, so --out is required; summary goes to stderr.\n\nDetail:\n  auto lists component members only for graphs with fewer than 100 nodes."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bin")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_rejects_unknown_arg() {
        let err = Cli::parse(&args(&["scc", "decompose", "--wat"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown arg"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_requires_input() {
        let err = Cli::parse(&args(&["scc", "decompose", "--format", "json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));

        let err = Cli::parse(&args(&["scc", "validate"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));
    }

    #[test]
    fn parse_decompose_defaults() {
        let cmd = Cli::parse(&args(&["scc", "decompose", "--in", "g.txt"])).expect("parse");
        match cmd {
            Cli::Decompose {
                input,
                output,
                format,
                detail,
                max_nodes,
                emit_events,
                verify,
            } => {
                assert_eq!(input, "g.txt");
                assert_eq!(output, None);
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(detail, DetailPolicy::Auto);
                assert_eq!(max_nodes, None);
                assert!(!emit_events);
                assert!(!verify);
            }
            _ => panic!("expected decompose"),
        }
    }

    #[test]
    fn parse_decompose_all_flags() {
        let cmd = Cli::parse(&args(&[
            "scc",
            "decompose",
            "--input",
            "g.txt",
            "--out",
            "r.json",
            "--format",
            "json",
            "--detail",
            "always",
            "--max-nodes",
            "500",
            "--emit-events",
            "--verify",
        ]))
        .expect("parse");
        match cmd {
            Cli::Decompose {
                output,
                format,
                detail,
                max_nodes,
                emit_events,
                verify,
                ..
            } => {
                assert_eq!(output.as_deref(), Some("r.json"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(detail, DetailPolicy::Always);
                assert_eq!(max_nodes, Some(500));
                assert!(emit_events);
                assert!(verify);
            }
            _ => panic!("expected decompose"),
        }
    }

    #[test]
    fn parse_rejects_bad_values() {
        let err = Cli::parse(&args(&["scc", "decompose", "--in", "g", "--format", "xml"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid --format: xml"));

        let err = Cli::parse(&args(&["scc", "decompose", "--in", "g", "--max-nodes", "-1"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid --max-nodes"));

        let err = Cli::parse(&args(&["scc", "decompose", "--in", "g", "--detail", "x"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown detail policy"));
    }

    #[test]
    fn parse_validate_success() {
        let cmd = Cli::parse(&args(&["scc", "validate", "--in", "g.txt"])).expect("parse");
        match cmd {
            Cli::Validate { input, max_nodes } => {
                assert_eq!(input, "g.txt");
                assert_eq!(max_nodes, None);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn parse_help_returns_error_with_usage() {
        let err = Cli::parse(&args(&["scc", "decompose", "--help"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Usage"));
    }

    #[tokio::test]
    async fn run_with_args_writes_text_report() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.txt");
        let output_path = dir.path().join("report.txt");
        std::fs::write(&input_path, "4\n0 1\n1 0\n1 2\n2 3\n3 2\n").expect("write input");

        run_with_args(&args(&[
            "scc",
            "decompose",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            output_path.to_str().unwrap(),
            "--verify",
        ]))
        .await
        .expect("run");

        let raw = std::fs::read_to_string(&output_path).expect("read output");
        assert_eq!(
            raw,
            "This graph has 2 strongly connected components\nComponent 1: 2 3\nComponent 2: 0 1\n"
        );
    }

    #[tokio::test]
    async fn run_with_args_writes_json_report() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.txt");
        let output_path = dir.path().join("report.json");
        std::fs::write(&input_path, "3\n0 1\n1 2\n").expect("write input");

        run_with_args(&args(&[
            "scc",
            "decompose",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            output_path.to_str().unwrap(),
            "--format",
            "json",
            "--emit-events",
        ]))
        .await
        .expect("run");

        let raw = std::fs::read_to_string(&output_path).expect("read output");
        let v: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(v["stats"]["components"], 3);
        assert_eq!(v["components"][0]["nodes"], serde_json::json!([2]));
    }

    #[tokio::test]
    async fn run_with_args_emit_events_requires_out_for_any_format() {
        for format in ["text", "json"] {
            let err = run_with_args(&args(&[
                "scc",
                "decompose",
                "--in",
                "unused.txt",
                "--format",
                format,
                "--emit-events",
            ]))
            .await
            .unwrap_err()
            .to_string();
            assert!(err.contains("--emit-events requires --out"), "{format}: {err}");
        }
    }

    #[tokio::test]
    async fn run_with_args_emit_events_surfaces_decompose_failure() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.txt");
        let output_path = dir.path().join("report.txt");
        std::fs::write(&input_path, "2\n0 1\n1 7\n").expect("write input");

        let err = run_with_args(&args(&[
            "scc",
            "decompose",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            output_path.to_str().unwrap(),
            "--emit-events",
        ]))
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("node 7 is out of range"));
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn run_with_args_validate_rejects_out_of_range_edge() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.txt");
        std::fs::write(&input_path, "2\n0 1\n1 2\n").expect("write input");

        let err = run_with_args(&args(&["scc", "validate", "--in", input_path.to_str().unwrap()]))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[tokio::test]
    async fn run_with_args_validate_ok() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.txt");
        std::fs::write(&input_path, "3\n0 1\n1 2\n2 0\n").expect("write input");

        run_with_args(&args(&["scc", "validate", "--in", input_path.to_str().unwrap()]))
            .await
            .expect("validate");
    }

    #[tokio::test]
    async fn run_uses_env_args_and_returns_usage_error_under_test_harness() {
        let err = run().await.unwrap_err().to_string();
        assert!(err.contains("Usage"));
    }
}
