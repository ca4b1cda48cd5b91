use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CORE_PACKAGE: &str = "serverless_api_core";
const LAMBDA_PACKAGE: &str = "serverless_api_lambda";
const RUNTIME_BIN: &str = "api_runtime";

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the serverless API workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the core and lambda test suites
    Test,
    /// Check formatting, run clippy, then the test suites
    Ci,
    /// Build `api_runtime` and zip it as a Lambda `bootstrap`
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving `api_runtime.zip`
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo");
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_tests() {
    for package in [CORE_PACKAGE, LAMBDA_PACKAGE] {
        run_cargo(&["test", "-p", package]);
    }
}

fn package_runtime(target: &str, profile: BuildProfile, out_dir: &Path) {
    let mut build = vec!["build", "-p", LAMBDA_PACKAGE, "--bin", RUNTIME_BIN, "--target", target];
    let profile_dir = match profile {
        BuildProfile::Debug => "debug",
        BuildProfile::Release => {
            build.push("--release");
            "release"
        }
    };
    run_cargo(&build);

    let binary = Path::new("target").join(target).join(profile_dir).join(RUNTIME_BIN);
    let archive = out_dir.join(format!("{RUNTIME_BIN}.zip"));
    fs::create_dir_all(out_dir).expect("failed to create output directory");
    let contents = fs::read(&binary)
        .unwrap_or_else(|error| panic!("cannot read '{}': {error}", binary.display()));
    write_bootstrap_zip(&archive, &contents)
        .unwrap_or_else(|error| panic!("cannot write '{}': {error}", archive.display()));

    eprintln!("packaged {}", archive.display());
}

/// Lambda custom runtimes execute an executable named `bootstrap` at the
/// archive root.
fn write_bootstrap_zip(archive: &Path, binary: &[u8]) -> ZipResult<()> {
    let mut zip = ZipWriter::new(File::create(archive)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()?;
    Ok(())
}

fn main() {
    match Cli::parse().command {
        Commands::Test => run_tests(),
        Commands::Ci => {
            run_cargo(&["fmt", "--all", "--", "--check"]);
            run_cargo(&["clippy", "--all-targets", "--", "-D", "warnings"]);
            run_tests();
        }
        Commands::ServerlessPackage {
            target,
            profile,
            out_dir,
        } => package_runtime(&target, profile, &out_dir),
    }
}
