use approx::{abs_diff_eq, assert_abs_diff_eq};
use prism_transform::pmath::matrix::Mat4;
use prism_transform::pmath::quaternion::Quat;
use prism_transform::pmath::vector::Vec3;
use prism_transform::{Geom, Transf};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const NUM_CASES: usize = 200;

fn rand_vec(rng: &mut Pcg32, range: f64) -> Vec3<f64> {
    Vec3::new(
        rng.gen_range(-range, range),
        rng.gen_range(-range, range),
        rng.gen_range(-range, range),
    )
}

// Diagonally dominant, so always invertible:
fn rand_mat(rng: &mut Pcg32) -> Mat4<f64> {
    let mut arr = [[0.; 4]; 4];
    for (r, row) in arr.iter_mut().enumerate() {
        for (c, e) in row.iter_mut().enumerate() {
            *e = rng.gen_range(-1., 1.);
            if r == c {
                *e += if rng.gen::<bool>() { 5. } else { -5. };
            }
        }
    }
    Mat4::from_arr(arr)
}

fn rand_trs(rng: &mut Pcg32) -> Transf {
    let mut axis = rand_vec(rng, 1.);
    while axis.length2() < 1e-4 {
        axis = rand_vec(rng, 1.);
    }
    let scale = Vec3::new(
        rng.gen_range(0.25, 4.),
        rng.gen_range(0.25, 4.),
        rng.gen_range(0.25, 4.),
    );
    Transf::new_translate(rand_vec(rng, 10.))
        * Transf::new_rotate(rng.gen_range(-180., 180.), axis)
        * Transf::new_scale(scale)
}

fn rand_quat(rng: &mut Pcg32) -> Quat<f64> {
    loop {
        let q = Quat::new(
            rng.gen_range(-1., 1.),
            rng.gen_range(-1., 1.),
            rng.gen_range(-1., 1.),
            rng.gen_range(-1., 1.),
        );
        if q.length2() > 1e-2 && q.length2() <= 1. {
            return q.normalize();
        }
    }
}

#[test]
fn inverse_of_invertible_matrix() {
    let mut rng = Pcg32::seed_from_u64(1);
    for _ in 0..NUM_CASES {
        let t = Transf::from_mat4(rand_mat(&mut rng)).unwrap();
        assert_eq!(t.inverse().get_frd(), t.get_inv());
        assert_eq!(t.inverse().get_inv(), t.get_frd());
        assert_abs_diff_eq!(t * t.inverse(), Transf::new_identity(), epsilon = 1e-9);
    }
}

#[test]
fn inverse_of_composition() {
    let mut rng = Pcg32::seed_from_u64(2);
    for _ in 0..NUM_CASES {
        let a = rand_trs(&mut rng);
        let b = Transf::from_mat4(rand_mat(&mut rng)).unwrap();
        assert_abs_diff_eq!((a * b).inverse(), b.inverse() * a.inverse(), epsilon = 1e-12);
    }
}

#[test]
fn normals_match_vectors_without_nonuniform_scale() {
    let mut rng = Pcg32::seed_from_u64(3);
    for _ in 0..NUM_CASES {
        let v = rand_vec(&mut rng, 1.);
        let axis = rand_vec(&mut rng, 1.) + Vec3::new(0., 0., 2.);
        let rot = Transf::new_rotate(rng.gen_range(-180., 180.), axis);
        assert_abs_diff_eq!(rot.normal(v), rot.vector(v), epsilon = 1e-12);

        // Uniform scale only changes the length of the normal:
        let uniform = rot * Transf::new_scale(Vec3::new(3., 3., 3.));
        assert_abs_diff_eq!(
            uniform.normal(v).normalize(),
            uniform.vector(v).normalize(),
            epsilon = 1e-9
        );
    }

    let squash = Transf::new_rotate_z(30.) * Transf::new_scale(Vec3::new(4., 1., 1.));
    let v = Vec3::new(1., 1., 0.);
    let n = squash.normal(v).normalize();
    let w = squash.vector(v).normalize();
    assert!((n - w).length() > 0.1);
}

#[test]
fn rotate_then_translate() {
    let t = Transf::new_translate(Vec3::new(1., 0., 0.)) * Transf::new_rotate_z(90.);
    match t.apply(Geom::Point(Vec3::new(1., 0., 0.))) {
        Geom::Point(p) => assert_abs_diff_eq!(p, Vec3::new(1., 1., 0.), epsilon = 1e-12),
        g => panic!("expected a point, got a {}", g.name()),
    }
}

#[test]
fn normals_are_not_renormalized() {
    let t = Transf::new_scale(Vec3::new(2., 1., 1.));
    assert_eq!(
        t.apply(Geom::Normal(Vec3::new(1., 0., 0.))),
        Geom::Normal(Vec3::new(0.5, 0., 0.))
    );
}

#[test]
fn quaternion_matrix_round_trip() {
    let mut rng = Pcg32::seed_from_u64(4);
    for _ in 0..NUM_CASES {
        let q = rand_quat(&mut rng);
        let r = Quat::from_mat4(q.to_mat4());
        assert!(
            abs_diff_eq!(r, q, epsilon = 1e-9) || abs_diff_eq!(r, -q, epsilon = 1e-9),
            "{:?} came back as {:?}",
            q,
            r
        );
    }
}

#[test]
fn slerp_endpoints() {
    let mut rng = Pcg32::seed_from_u64(5);
    for _ in 0..NUM_CASES {
        let q1 = rand_quat(&mut rng);
        let q2 = rand_quat(&mut rng);
        assert_abs_diff_eq!(q1.slerp(q2, 0.), q1, epsilon = 1e-9);
        assert_abs_diff_eq!(q1.slerp(q2, 1.), q2, epsilon = 1e-6);

        let t = rng.gen_range(0., 1.);
        assert_abs_diff_eq!(q1.slerp(q1, t), q1, epsilon = 1e-12);
        assert_abs_diff_eq!(q1.slerp(q2, t).length(), 1., epsilon = 1e-9);

        // Opposite ends have no unique arc between them, but the ends still hold:
        assert_abs_diff_eq!(q1.slerp(-q1, 0.), q1, epsilon = 1e-12);
        assert_abs_diff_eq!(q1.slerp(-q1, 1.), -q1, epsilon = 1e-12);
        assert_abs_diff_eq!(q1.slerp(-q1, t).length(), 1., epsilon = 1e-12);
    }
}

#[test]
fn bbox_contains_transformed_corners() {
    use prism_transform::pmath::bbox::BBox3;

    let mut rng = Pcg32::seed_from_u64(6);
    for _ in 0..NUM_CASES {
        let t = rand_trs(&mut rng);
        let b = BBox3::from_pnts(rand_vec(&mut rng, 5.), rand_vec(&mut rng, 5.));
        let tb = t.bbox(b);
        let corners = (0..8).fold(BBox3::new(), |acc, i| acc.combine_pnt(t.point(b.corner(i))));
        assert_abs_diff_eq!(tb.pmin, corners.pmin, epsilon = 1e-9);
        assert_abs_diff_eq!(tb.pmax, corners.pmax, epsilon = 1e-9);
    }
}
