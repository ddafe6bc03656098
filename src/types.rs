/// Positions on the detector plane, in mm
pub type Length = f64;

/// Histogram bin contents. Counts are read as floats: d2t files may hold
/// normalized or scaled values.
pub type Count = f64;

pub type Ratio = f64;

/// Integer window radius used when sweeping, in mm
pub type RadiusMm = u32;
