//! NURBS evaluation primitives
//!
//! All routines here work on *full* knot vectors (`n + p + 1` knots, the
//! textbook convention). Native curves and surfaces store the shorter
//! `n + p - 1` form without the two superfluous end knots; use
//! [`full_knots`] and [`native_knots`] to move between the two.
//!
//! Control points are passed in homogeneous form `[w·x, w·y, w·z, w]`.

use crate::types::Vector3;

/// Homogeneous control point `[w·x, w·y, w·z, w]`
pub type Homogeneous = [f64; 4];

/// Lift a euclidean point with weight into homogeneous form
pub fn to_homogeneous(p: Vector3, w: f64) -> Homogeneous {
    [p.x * w, p.y * w, p.z * w, w]
}

/// Project a homogeneous point back to euclidean space
///
/// A zero weight yields the raw xyz, which keeps degenerate input finite.
pub fn from_homogeneous(h: Homogeneous) -> Vector3 {
    if h[3].abs() < 1e-300 {
        Vector3::new(h[0], h[1], h[2])
    } else {
        Vector3::new(h[0] / h[3], h[1] / h[3], h[2] / h[3])
    }
}

/// Validate a full knot vector: non-decreasing, length = points + degree + 1
pub fn validate_knots(knots: &[f64], n_points: usize, degree: usize) -> bool {
    if degree == 0 || n_points <= degree || knots.len() != n_points + degree + 1 {
        return false;
    }
    knots.windows(2).all(|w| w[1] >= w[0]) && knots[n_points] > knots[degree]
}

/// Expand a native knot vector (`n + p - 1`) to the full form
pub fn full_knots(native: &[f64]) -> Vec<f64> {
    let mut knots = Vec::with_capacity(native.len() + 2);
    if let (Some(first), Some(last)) = (native.first(), native.last()) {
        knots.push(*first);
        knots.extend_from_slice(native);
        knots.push(*last);
    }
    knots
}

/// Strip the superfluous end knots from a full knot vector
pub fn native_knots(full: &[f64]) -> Vec<f64> {
    if full.len() < 2 {
        return Vec::new();
    }
    full[1..full.len() - 1].to_vec()
}

/// Clamped knot vector with uniformly spaced interior knots on `[0, 1]`
pub fn clamped_uniform_knots(n_points: usize, degree: usize) -> Vec<f64> {
    let n_interior = n_points.saturating_sub(degree + 1);
    let mut knots = vec![0.0; degree + 1];
    for i in 1..=n_interior {
        knots.push(i as f64 / (n_interior + 1) as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Parameter domain `(knots[p], knots[n])` of a full knot vector
pub fn parameter_domain(knots: &[f64], n_points: usize, degree: usize) -> (f64, f64) {
    (knots[degree], knots[n_points])
}

/// Number of non-empty knot spans inside the domain
pub fn span_count(knots: &[f64], n_points: usize, degree: usize) -> usize {
    (degree..n_points)
        .filter(|&i| knots[i + 1] > knots[i])
        .count()
}

/// Find the knot span index for parameter `t`.
///
/// Returns `i` such that `knots[i] <= t < knots[i+1]`, clamped to the valid
/// range. `n` is the last control point index.
pub fn find_span(knots: &[f64], n: usize, degree: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        // last non-empty span
        let mut span = n;
        while span > degree && knots[span] >= knots[n + 1] {
            span -= 1;
        }
        return span;
    }
    if t <= knots[degree] {
        let mut span = degree;
        while span < n && knots[span + 1] <= knots[degree] {
            span += 1;
        }
        return span;
    }
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Compute the `degree + 1` non-zero basis function values at `t`.
pub fn basis_functions(knots: &[f64], span: usize, degree: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            if denom.abs() < 1e-30 {
                // zero-length knot interval
                n[r] = saved;
                saved = 0.0;
                continue;
            }
            let temp = n[r] / denom;
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }

    n
}

/// Evaluate a rational curve at `t`
pub fn evaluate_curve(points: &[Homogeneous], knots: &[f64], degree: usize, t: f64) -> Vector3 {
    let n = points.len() - 1;
    let span = find_span(knots, n, degree, t);
    let basis = basis_functions(knots, span, degree, t);

    let mut acc = [0.0; 4];
    for (i, b) in basis.iter().enumerate() {
        let cp = points[span - degree + i];
        for k in 0..4 {
            acc[k] += b * cp[k];
        }
    }
    from_homogeneous(acc)
}

/// Evaluate a rational surface at `(u, v)`
///
/// `points` is laid out u-major: index `i * v_count + j` holds the point at
/// u index `i`, v index `j`.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_surface(
    points: &[Homogeneous],
    u_count: usize,
    v_count: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    degree_u: usize,
    degree_v: usize,
    u: f64,
    v: f64,
) -> Vector3 {
    let span_u = find_span(knots_u, u_count - 1, degree_u, u);
    let span_v = find_span(knots_v, v_count - 1, degree_v, v);
    let nu = basis_functions(knots_u, span_u, degree_u, u);
    let nv = basis_functions(knots_v, span_v, degree_v, v);

    let mut acc = [0.0; 4];
    for (i, bu) in nu.iter().enumerate() {
        let ui = span_u - degree_u + i;
        for (j, bv) in nv.iter().enumerate() {
            let vj = span_v - degree_v + j;
            let cp = points[ui * v_count + vj];
            let b = bu * bv;
            for k in 0..4 {
                acc[k] += b * cp[k];
            }
        }
    }
    from_homogeneous(acc)
}

/// Insert the knot `t` once (Boehm's algorithm, in homogeneous space)
pub fn insert_knot(
    points: &[Homogeneous],
    knots: &[f64],
    degree: usize,
    t: f64,
) -> (Vec<Homogeneous>, Vec<f64>) {
    let n = points.len() - 1;
    let p = degree;
    let span = find_span(knots, n, p, t);

    let mut new_knots = Vec::with_capacity(knots.len() + 1);
    new_knots.extend_from_slice(&knots[..=span]);
    new_knots.push(t);
    new_knots.extend_from_slice(&knots[span + 1..]);

    let mut new_points = Vec::with_capacity(points.len() + 1);
    new_points.extend_from_slice(&points[..=(span - p)]);
    for i in (span - p + 1)..=span {
        let denom = knots[i + p] - knots[i];
        let alpha = if denom.abs() < 1e-30 { 0.0 } else { (t - knots[i]) / denom };
        let (h0, h1) = (points[i - 1], points[i]);
        let mut h = [0.0; 4];
        for k in 0..4 {
            h[k] = (1.0 - alpha) * h0[k] + alpha * h1[k];
        }
        new_points.push(h);
    }
    new_points.extend_from_slice(&points[span..]);

    (new_points, new_knots)
}

/// A single Bezier span: `degree + 1` homogeneous points over `[t0, t1]`
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSpan {
    pub points: Vec<Homogeneous>,
    pub t0: f64,
    pub t1: f64,
}

/// Split a clamped curve into Bezier spans by saturating every interior knot
pub fn decompose_bezier(points: &[Homogeneous], knots: &[f64], degree: usize) -> Vec<BezierSpan> {
    let n_points = points.len();
    let (t_start, t_end) = parameter_domain(knots, n_points, degree);

    let mut breaks: Vec<(f64, usize)> = Vec::new();
    for &k in &knots[degree + 1..n_points] {
        if k <= t_start || k >= t_end {
            continue;
        }
        match breaks.last_mut() {
            Some((value, count)) if *value == k => *count += 1,
            _ => breaks.push((k, 1)),
        }
    }

    let mut pts = points.to_vec();
    let mut kts = knots.to_vec();
    for &(value, multiplicity) in &breaks {
        for _ in multiplicity..degree {
            let (p, k) = insert_knot(&pts, &kts, degree, value);
            pts = p;
            kts = k;
        }
    }

    let mut params = vec![t_start];
    params.extend(breaks.iter().map(|(v, _)| *v));
    params.push(t_end);

    params
        .windows(2)
        .enumerate()
        .filter_map(|(j, w)| {
            let start = j * degree;
            let slice = pts.get(start..=start + degree)?;
            Some(BezierSpan {
                points: slice.to_vec(),
                t0: w[0],
                t1: w[1],
            })
        })
        .collect()
}

/// Raise the degree of a Bezier span by `times`
pub fn elevate_bezier(points: &[Homogeneous], times: usize) -> Vec<Homogeneous> {
    let mut current = points.to_vec();
    for _ in 0..times {
        let p = current.len() - 1;
        let mut next = Vec::with_capacity(p + 2);
        next.push(current[0]);
        for i in 1..=p {
            let a = i as f64 / (p + 1) as f64;
            let mut h = [0.0; 4];
            for k in 0..4 {
                h[k] = a * current[i - 1][k] + (1.0 - a) * current[i][k];
            }
            next.push(h);
        }
        next.push(current[p]);
        current = next;
    }
    current
}

/// Concatenate Bezier spans of equal degree into one C0 curve
///
/// Returns homogeneous points and a full knot vector. Span parameter ranges
/// are laid end to end, keeping each span's own length.
pub fn join_bezier_spans(spans: &[BezierSpan], degree: usize) -> (Vec<Homogeneous>, Vec<f64>) {
    let mut points = Vec::new();
    let mut knots = Vec::new();
    let mut t = spans.first().map(|s| s.t0).unwrap_or(0.0);
    knots.extend(std::iter::repeat(t).take(degree + 1));

    for (i, span) in spans.iter().enumerate() {
        if i == 0 {
            points.extend_from_slice(&span.points);
        } else {
            points.extend_from_slice(&span.points[1..]);
        }
        let len = (span.t1 - span.t0).abs().max(1e-12);
        t += len;
        let mult = if i + 1 == spans.len() { degree + 1 } else { degree };
        knots.extend(std::iter::repeat(t).take(mult));
    }
    (points, knots)
}

/// Quadratic rational arc in the frame `(center, x_axis, y_axis)`.
///
/// The sweep is split into at most 90° segments. Returns euclidean control
/// points, weights and a full knot vector on `[0, 1]`. A zero sweep yields a
/// single degenerate segment.
pub fn arc_control_points(
    center: Vector3,
    x_axis: Vector3,
    y_axis: Vector3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> (Vec<Vector3>, Vec<f64>, Vec<f64>) {
    let sweep = end_angle - start_angle;
    let segments = ((sweep.abs() / std::f64::consts::FRAC_PI_2).ceil() as usize).max(1);
    let delta = sweep / segments as f64;
    let w_mid = (delta / 2.0).cos();

    let at = |angle: f64| center + (x_axis * angle.cos() + y_axis * angle.sin()) * radius;

    let mut points = Vec::with_capacity(2 * segments + 1);
    let mut weights = Vec::with_capacity(2 * segments + 1);
    points.push(at(start_angle));
    weights.push(1.0);

    for s in 0..segments {
        let a0 = start_angle + delta * s as f64;
        let a1 = a0 + delta;
        let mid_angle = 0.5 * (a0 + a1);
        // tangent intersection lies at radius / cos(delta/2) along the bisector
        let mid = if w_mid.abs() < 1e-12 {
            at(mid_angle)
        } else {
            center + (x_axis * mid_angle.cos() + y_axis * mid_angle.sin()) * (radius / w_mid)
        };
        points.push(mid);
        weights.push(w_mid);
        points.push(at(a1));
        weights.push(1.0);
    }

    let mut knots = vec![0.0; 3];
    for s in 1..segments {
        let k = s as f64 / segments as f64;
        knots.push(k);
        knots.push(k);
    }
    knots.extend([1.0; 3]);

    (points, weights, knots)
}
