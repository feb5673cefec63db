// Locale Router - workspace tasks (`cargo xtask <task>`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

const USAGE: &str = "\
Usage: cargo xtask <TASK> [ARGS...]

Tasks:
  build [--release]   Build the workspace
  test                Run unit and router tests
  fmt [--check]       Format, or only verify formatting
  clippy              Lint all targets, warnings are errors
  ci                  fmt --check, clippy, test
  run [ARGS...]       Start the demo server (e.g. run --config conf/config.toml)";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let task = args.next();
    let rest: Vec<String> = args.collect();
    let flag = |name: &str| rest.iter().any(|arg| arg == name);

    let sh = Shell::new()?;
    sh.change_dir(workspace_root());

    match task.as_deref() {
        Some("build") => build(&sh, flag("--release")),
        Some("test") => test(&sh),
        Some("fmt") => fmt(&sh, flag("--check")),
        Some("clippy") => clippy(&sh),
        Some("ci") => ci(&sh),
        Some("run") => run(&sh, &rest),
        Some("help") | None => {
            println!("{USAGE}");
            Ok(())
        },
        Some(other) => bail!("unknown task `{other}`\n\n{USAGE}"),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let profile = release.then_some("--release");
    cmd!(sh, "cargo build -p locale-router {profile...}").run().context("build failed")
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test -p locale-router --all-targets").run().context("tests failed")
}

fn fmt(sh: &Shell, check: bool) -> Result<()> {
    let check = check.then_some(["--", "--check"]).into_iter().flatten();
    cmd!(sh, "cargo fmt --all {check...}").run().context("formatting check failed")
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings")
        .run()
        .context("clippy reported warnings")
}

fn ci(sh: &Shell) -> Result<()> {
    let steps: [(&str, fn(&Shell) -> Result<()>); 3] =
        [("fmt", |sh| fmt(sh, true)), ("clippy", clippy), ("test", test)];

    for (idx, (name, step)) in steps.iter().enumerate() {
        println!("==> [{}/{}] {}", idx + 1, steps.len(), name);
        step(sh)?;
    }
    println!("==> ci passed");
    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    // config paths in `conf/` are relative to the backend crate
    let _dir = sh.push_dir("backend");
    cmd!(sh, "cargo run --bin locale-router -- {args...}").run().context("demo server exited with an error")
}

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}
