//! Command-line surface for the polibot kinematics core.
//!
//! Three modes of operation:
//! - `forward`: joint angles in, end-effector pose and frame origins out
//! - `inverse`: pose matrix in, candidate joint-angle solutions out
//! - `info`: print the active arm geometry and joint limits
//!
//! All text parsing happens here; the core only ever sees validated
//! numbers. Non-numeric input, wrong counts, and unreachable poses are
//! reported as structured failures, never panics.

use clap::{Parser, Subcommand};

use polibot_core::error::PolibotError;
use polibot_core::geometry::ArmGeometry;
use polibot_core::types::{JointAngles, pose_from_row_major};
use polibot_kinematics::{FkResult, forward, inverse};
use polibot_scene::layout;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Kinematics for the polibot 4-DOF grind/polish arm.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Optional TOML file overriding the arm geometry.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the end-effector pose from four joint angles.
    Forward {
        /// Joint angles in radians, comma-separated (e.g. "0.1,0.2,0.3,0.4").
        #[arg(short, long)]
        angles: String,

        /// Also print link-segment placements for rendering.
        #[arg(long)]
        segments: bool,
    },

    /// Compute candidate joint angles from an end-effector pose.
    Inverse {
        /// 16 row-major pose entries, comma-separated.
        #[arg(short, long)]
        pose: String,
    },

    /// Print the active geometry and joint limits.
    Info,
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Parse a comma-separated list of real numbers.
///
/// Rejection here is the "invalid input" boundary of the system; the
/// kinematics core never sees text.
fn parse_values(text: &str) -> Result<Vec<f64>, String> {
    text.split(',')
        .map(str::trim)
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| format!("invalid input: '{token}' is not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn print_pose(pose: &polibot_core::types::Pose) {
    for row in 0..4 {
        println!(
            "  [{:10.6} {:10.6} {:10.6} {:10.6}]",
            pose[(row, 0)],
            pose[(row, 1)],
            pose[(row, 2)],
            pose[(row, 3)]
        );
    }
}

fn run_forward(geometry: &ArmGeometry, angles: &str, segments: bool) -> Result<(), String> {
    let values = parse_values(angles)?;
    let q = JointAngles::from_slice(&values).map_err(|e| e.to_string())?;

    let fk: FkResult = forward(geometry, &q);

    println!("end-effector pose:");
    print_pose(fk.ee_pose());

    println!("\njoint frame origins:");
    for (i, pose) in fk.frame_poses.iter().enumerate() {
        println!(
            "  joint {}: ({:9.6}, {:9.6}, {:9.6})",
            i + 1,
            pose[(0, 3)],
            pose[(1, 3)],
            pose[(2, 3)]
        );
    }

    if segments {
        let scene = layout(&fk);
        println!("\nlink segments:");
        for (i, link) in scene.links.iter().enumerate() {
            let (axis, angle) = link
                .rotation
                .axis_angle()
                .map_or(([0.0, 0.0, 1.0], 0.0), |(axis, angle)| {
                    ([axis.x, axis.y, axis.z], angle)
                });
            println!(
                "  link {}: length {:.6}, midpoint ({:.6}, {:.6}, {:.6}), axis ({:.4}, {:.4}, {:.4}) angle {:.6}",
                i + 1,
                link.length,
                link.midpoint.x,
                link.midpoint.y,
                link.midpoint.z,
                axis[0],
                axis[1],
                axis[2],
                angle
            );
        }
    }

    Ok(())
}

fn run_inverse(geometry: &ArmGeometry, pose_text: &str) -> Result<(), String> {
    let values = parse_values(pose_text)?;
    let pose = pose_from_row_major(&values).map_err(|e| e.to_string())?;

    let solutions = inverse(geometry, &pose);
    if solutions.is_empty() {
        println!("pose unreachable: no branch admits a real solution");
        return Ok(());
    }

    println!("{} candidate solution(s):", solutions.len());
    for (i, solution) in solutions.iter().enumerate() {
        let marks: String = solution
            .clamped
            .iter()
            .map(|&c| if c { '*' } else { ' ' })
            .collect();
        println!(
            "  {} [{:9.6} {:9.6} {:9.6} {:9.6}]  {}",
            i,
            solution.angles[0],
            solution.angles[1],
            solution.angles[2],
            solution.angles[3],
            if solution.is_clamped() {
                format!("clamped: {marks}")
            } else {
                String::new()
            }
        );
    }
    println!("(* = joint clamped to its travel bound; pose not met exactly)");

    Ok(())
}

fn run_info(geometry: &ArmGeometry) {
    println!("polibot v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("geometry:");
    println!("  a1 = {:.3} m", geometry.a1);
    println!("  a2 = {:.3} m", geometry.a2);
    println!("  a3 = {:.3} m", geometry.a3);
    println!("  d4 = {:.3} m", geometry.d4);
    println!("  reach = {:.3} m", geometry.reach());
    println!();
    println!("joint limits (rad):");
    for (i, limits) in geometry.limits.iter().enumerate() {
        println!("  joint {}: [{:9.6}, {:9.6}]", i + 1, limits.min, limits.max);
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn load_geometry(cli: &Cli) -> Result<ArmGeometry, PolibotError> {
    match &cli.config {
        Some(path) => Ok(ArmGeometry::from_toml_file(path)?),
        None => Ok(ArmGeometry::default()),
    }
}

fn main() {
    let cli = Cli::parse();

    let geometry = match load_geometry(&cli) {
        Ok(geometry) => geometry,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Commands::Forward { angles, segments } => run_forward(&geometry, angles, *segments),
        Commands::Inverse { pose } => run_inverse(&geometry, pose),
        Commands::Info => {
            run_info(&geometry);
            Ok(())
        }
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
