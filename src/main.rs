//! Command-line front end for the Curve25519 ladder
//!
//! Run with `RUST_LOG=x25519_ladder=debug` to see ladder progress.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use x25519_ladder::curve::{curve_points, public_key, recover_v, scalar_multiply};
use x25519_ladder::{Error, FieldElement, ProjectivePoint, Scalar};

#[derive(Parser)]
#[command(
    name = "x25519-ladder",
    about = "Curve25519 field and ladder arithmetic (didactic, not constant-time)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Public key n*P for the base point u = 9
    Pubkey {
        /// Private scalar, decimal or 0x-prefixed hex
        n: Scalar,
        /// Clamp the scalar first (clear low 3 bits, set bit 254)
        #[arg(long)]
        clamp: bool,
    },
    /// Affine u of n*P for the point with u-coordinate `u`
    Mult {
        n: Scalar,
        /// u-coordinate, reduced modulo p
        u: Scalar,
    },
    /// Both v-coordinates of the point with u-coordinate `u`
    RecoverV { u: Scalar },
    /// Trace of successive doublings of the base point
    Doublings {
        #[arg(default_value_t = 254)]
        count: usize,
    },
    /// Curve points with u in [0, count]
    Points {
        #[arg(default_value_t = 100)]
        count: u64,
    },
}

fn to_field(value: &Scalar) -> Result<FieldElement> {
    FieldElement::from_le_bytes(value.as_le_bytes())
        .with_context(|| format!("{} does not fit in the working width", value))
}

fn print_u(label: &str, result: x25519_ladder::Result<FieldElement>) -> Result<()> {
    match result {
        Ok(u) => println!("{} = 0x{}", label, u.to_hex(256)),
        Err(Error::NonInvertible(_)) => println!("{} = N/A (point at infinity)", label),
        Err(e) => return Err(anyhow::Error::new(e).context(label.to_string())),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Pubkey { n, clamp } => {
            let n = if clamp { n.clamped() } else { n };
            println!("n = {}", n);
            print_u("pubkey", public_key(&n))?;
        }
        Command::Mult { n, u } => {
            let u = to_field(&u)?;
            let point = scalar_multiply(u, &n);
            print_u(&format!("{} * {}", n, u), point.affine_u())?;
        }
        Command::RecoverV { u } => {
            let u = to_field(&u)?;
            match recover_v(u) {
                Ok((v1, v2)) => {
                    println!("v1 = 0x{}", v1.to_hex(0));
                    println!("v2 = 0x{}", v2.to_hex(0));
                }
                Err(Error::NoRoot) => println!("u = {} is not on the curve (no roots)", u),
                Err(e) => return Err(anyhow::Error::new(e).context("recovering v")),
            }
        }
        Command::Doublings { count } => {
            let mut point = ProjectivePoint::base_point();
            for i in 0..=count {
                print_u(&format!("{{2^{:03}}}P X", i), point.affine_u())?;
                point = point.double();
            }
        }
        Command::Points { count } => {
            for point in curve_points(0..=count) {
                println!("{} 0x{}", point.u.value().to_hex(0), point.v.to_hex(0));
            }
        }
    }

    Ok(())
}
