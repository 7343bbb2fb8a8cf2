pub mod cross_section;
pub mod curve;

pub use cross_section::CrossSection;
pub use curve::{BlendedHelixCurve, CctParams, CurveDomain, PeriodicHelix, SpaceCurve};
