/// Trims the segment between two node centers so it ends on both circles.
///
/// Coincident centers get a length floored to 1, which keeps the result finite.
pub fn trim_segment(from: (f64, f64), to: (f64, f64), radius: f64) -> ((f64, f64), (f64, f64)) {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt().max(1.0);
	let (ux, uy) = (dx / dist, dy / dist);
	(
		(from.0 + ux * radius, from.1 + uy * radius),
		(to.0 - ux * radius, to.1 - uy * radius),
	)
}
