// Transfer curve for the master limiter. Kept free of web-sys so it can be
// tested on the host.

/// Arctan curve over input \[-1, 1\] whose output magnitude stays strictly
/// below `ceiling`. Small-signal gain is `2 * drive / PI`.
pub fn limiter_curve(len: usize, drive: f32, ceiling: f32) -> Vec<f32> {
    let len = len.max(2);
    (0..len)
        .map(|i| {
            let x = (i as f32 / (len - 1) as f32) * 2.0 - 1.0;
            ceiling * (2.0 / std::f32::consts::PI) * (drive * x / ceiling).atan()
        })
        .collect()
}
