use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "docshare_lambda";
const LAMBDA_BINARIES: [&str; 2] = ["upload_lambda", "login_lambda"];
const DIST_DIR: &str = "infra/aws_docshare/dist";

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the DocShare Lambda workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt --check, clippy -D warnings, then the workspace tests
    Ci,
    /// Build both Lambda binaries and zip each one as `bootstrap`
    Package {
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        #[arg(value_enum, long, default_value_t = Profile::Release)]
        profile: Profile,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
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

fn ci() {
    run_cargo(&["fmt", "--all", "--", "--check"]);
    run_cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    run_cargo(&["test", "--workspace"]);
}

fn package(target: &str, profile: Profile) {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for bin in LAMBDA_BINARIES {
        args.extend(["--bin", bin]);
    }
    let profile_dir = match profile {
        Profile::Debug => "debug",
        Profile::Release => {
            args.push("--release");
            "release"
        }
    };
    run_cargo(&args);

    let build_dir = Path::new("target").join(target).join(profile_dir);
    fs::create_dir_all(DIST_DIR).expect("failed to create lambda dist directory");
    for bin in LAMBDA_BINARIES {
        let archive = zip_bootstrap(&build_dir.join(bin), bin);
        eprintln!("packaged {}", archive.display());
    }
}

/// Lambda's `provided` runtimes execute a file named `bootstrap`.
fn zip_bootstrap(binary_path: &Path, bin: &str) -> PathBuf {
    let binary = fs::read(binary_path)
        .unwrap_or_else(|error| panic!("failed to read {}: {error}", binary_path.display()));
    let archive = Path::new(DIST_DIR).join(format!("{bin}.zip"));
    let file = fs::File::create(&archive).expect("failed to create lambda zip");

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
    archive
}

fn main() {
    match Cli::parse().command {
        Commands::Ci => ci(),
        Commands::Package { target, profile } => package(&target, profile),
    }
}
