//! Builds the default CCT winding and logs a summary.
//!
//! Usage:
//! ```text
//! cargo run --example coil
//! RUST_LOG=cctcoil=debug cargo run --example coil
//! ```

use cctcoil::geometry::{BlendedHelixCurve, CctParams, CrossSection, SpaceCurve};
use cctcoil::operations::creation::{MakeCoil, TapeParams};
use cctcoil::operations::sampling::{DegenerateFrames, SampleCurve, SamplingParams, Spacing};
use cctcoil::topology::TopologyStore;

/// Uniform pieces used to measure the base curve length.
const LENGTH_SEGMENTS: u32 = 144;

fn main() -> cctcoil::Result<()> {
    // Default: WARN for everything, INFO for cctcoil.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("coil=info".parse().unwrap_or_default())
        .add_directive("cctcoil=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let curve = BlendedHelixCurve::new(CctParams::default())?;
    let domain = curve.domain();
    let step = (domain.t_max - domain.t_min) / f64::from(LENGTH_SEGMENTS);
    let mut length = 0.0;
    for k in 0..LENGTH_SEGMENTS {
        let ta = domain.t_min + step * f64::from(k);
        length += curve.segment_length(ta, ta + step)?;
    }
    let (t_a, t_b) = curve.splice_points();
    tracing::info!(t_min = domain.t_min, t_a, t_b, t_max = domain.t_max, length, "base curve");

    let samples = SampleCurve::new(SamplingParams {
        count: 200,
        spacing: Spacing::ArcLength,
        degenerate_frames: DegenerateFrames::Transport,
    })
    .execute(&curve)?;

    let middle = &samples[samples.len() / 2];
    let (kappa, tau) = curve.kappa_tau(middle.t)?;
    tracing::info!(t = middle.t, kappa, tau, "mid-winding curvature");

    let cross_section = CrossSection::stacked(4.0, 1.0, 4)?;
    let mut store = TopologyStore::new();
    let coil = MakeCoil::new(&samples, &cross_section, TapeParams::default())
        .execute(&curve, &mut store)?;

    tracing::info!(
        tapes = coil.tapes.len(),
        blocks = coil.blocks.len(),
        points = store.num_points(),
        curves = store.num_curves(),
        loops = store.num_curve_loops(),
        surfaces = store.num_surfaces(),
        "coil topology"
    );
    Ok(())
}
