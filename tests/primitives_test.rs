use approx::assert_relative_eq;
use nalgebra::Vector3;
use volsdf::primitives::{sdf_box, sdf_cylinder, sdf_rounded_box, sdf_sphere, sdf_torus};
use volsdf::{Frame, Node};

#[test]
fn sphere_center_is_negative() {
    let d = sdf_sphere(Vector3::zeros(), Vector3::zeros(), 5.0);
    assert_relative_eq!(d, -5.0, epsilon = 1e-12);
}

#[test]
fn sphere_surface_is_zero() {
    let d = sdf_sphere(Vector3::new(5.0, 0.0, 0.0), Vector3::zeros(), 5.0);
    assert_relative_eq!(d, 0.0, epsilon = 1e-12);
}

#[test]
fn sphere_outside_is_positive() {
    let d = sdf_sphere(Vector3::new(10.0, 0.0, 0.0), Vector3::zeros(), 5.0);
    assert_relative_eq!(d, 5.0, epsilon = 1e-12);
}

#[test]
fn sphere_node_matches_kernel() {
    let s = Node::sphere(Vector3::zeros(), 5.0);
    assert_relative_eq!(s.distance(Vector3::new(5.0, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.distance(Vector3::zeros()), -5.0, epsilon = 1e-12);
    assert_relative_eq!(s.distance(Vector3::new(10.0, 0.0, 0.0)), 5.0, epsilon = 1e-12);
}

#[test]
fn box_face_center_is_zero() {
    let d = sdf_box(Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 3.0));
    assert_relative_eq!(d, 0.0, epsilon = 1e-12);
}

#[test]
fn box_outside_corner_is_euclidean() {
    let d = sdf_box(Vector3::new(2.0, 3.0, 3.0), Vector3::new(1.0, 2.0, 3.0));
    assert_relative_eq!(d, 2.0_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn box_inside_is_nearest_face() {
    let d = sdf_box(Vector3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 2.0, 3.0));
    assert_relative_eq!(d, -0.5, epsilon = 1e-12);
}

#[test]
fn rounded_box_keeps_face_extent() {
    let h = Vector3::new(2.0, 2.0, 2.0);
    let d = sdf_rounded_box(Vector3::new(2.0, 0.0, 0.0), h, 0.5);
    assert_relative_eq!(d, 0.0, epsilon = 1e-12);
}

#[test]
fn rounded_box_cuts_corner() {
    let h = Vector3::new(2.0, 2.0, 2.0);
    let corner = Vector3::new(2.0, 2.0, 2.0);
    let sharp = sdf_rounded_box(corner, h, 0.0);
    let round = sdf_rounded_box(corner, h, 0.5);
    assert_relative_eq!(sharp, 0.0, epsilon = 1e-12);
    // Corner sphere of radius 0.5 centered at (1.5, 1.5, 1.5).
    assert_relative_eq!(round, 0.5 * 3.0_f64.sqrt() - 0.5, epsilon = 1e-12);
}

#[test]
fn rounded_box_zero_radius_is_sharp_box() {
    let h = Vector3::new(1.0, 2.0, 0.5);
    for p in [
        Vector3::new(0.3, -0.4, 0.1),
        Vector3::new(3.0, 1.0, -2.0),
        Vector3::new(-1.0, 2.5, 0.5),
    ] {
        assert_eq!(sdf_rounded_box(p, h, 0.0), sdf_box(p, h));
    }
}

#[test]
fn rounded_box_approaches_sharp_box_continuously() {
    let h = Vector3::new(1.0, 1.0, 1.0);
    let p = Vector3::new(1.5, 1.5, 0.0);
    let sharp = sdf_box(p, h);
    let almost = sdf_rounded_box(p, h, 1e-9);
    assert_relative_eq!(sharp, almost, epsilon = 1e-8);
}

#[test]
fn oversized_rounding_is_clamped() {
    let h = Vector3::new(1.0, 1.0, 1.0);
    // Radius larger than the box turns it into the inscribed sphere.
    let d = sdf_rounded_box(Vector3::new(3.0, 0.0, 0.0), h, 10.0);
    assert_relative_eq!(d, 2.0, epsilon = 1e-12);
}

#[test]
fn torus_tube_center_is_negative_minor_radius() {
    let d = sdf_torus(Vector3::new(3.0, 0.0, 0.0), 3.0, 0.5);
    assert_relative_eq!(d, -0.5, epsilon = 1e-12);
}

#[test]
fn torus_hole_center_is_outside() {
    let d = sdf_torus(Vector3::zeros(), 3.0, 0.5);
    assert_relative_eq!(d, 2.5, epsilon = 1e-12);
}

#[test]
fn torus_ring_lies_in_xy_plane() {
    let d = sdf_torus(Vector3::new(0.0, 3.0, 0.5), 3.0, 0.5);
    assert_relative_eq!(d, 0.0, epsilon = 1e-12);
}

#[test]
fn cylinder_on_axis_is_negative() {
    let d = sdf_cylinder(Vector3::new(0.0, 0.0, 1.0), 2.0, 10.0);
    assert_relative_eq!(d, -2.0, epsilon = 1e-12);
}

#[test]
fn cylinder_cap_is_zero() {
    let d = sdf_cylinder(Vector3::new(0.5, 0.0, 5.0), 2.0, 10.0);
    assert_relative_eq!(d, 0.0, epsilon = 1e-12);
}

#[test]
fn cylinder_outside_rim_is_euclidean() {
    let d = sdf_cylinder(Vector3::new(5.0, 0.0, 9.0), 2.0, 10.0);
    assert_relative_eq!(d, 5.0, epsilon = 1e-12);
}

#[test]
fn framed_primitives_are_frame_invariant() {
    let frame = Frame::new(
        Vector3::new(1.0, -2.0, 0.5),
        Vector3::new(1.0, 0.2, 0.1),
        Vector3::new(-0.3, 1.0, 0.2),
    )
    .unwrap();
    let shapes = [
        Node::rounded_cuboid(Vector3::new(1.0, 2.0, 3.0), 0.25),
        Node::torus(3.0, 0.5),
        Node::cylinder(2.0, 6.0),
    ];
    let locals = [
        Vector3::new(0.3, 0.1, -0.2),
        Vector3::new(2.0, 3.0, 4.0),
        Vector3::new(-4.0, 0.5, 1.0),
    ];
    for shape in shapes {
        let placed = shape.clone().with_frame(frame);
        for local in locals {
            assert_relative_eq!(
                placed.distance(frame.to_world(local)),
                shape.distance(local),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn sphere_with_frame_moves_center() {
    // +Z plane frame: local X runs along world -Y.
    let frame = Frame::from_plane(Vector3::new(4.0, 0.0, 0.0), Vector3::z()).unwrap();
    let s = Node::sphere(Vector3::new(1.0, 0.0, 0.0), 1.0).with_frame(frame);
    assert_relative_eq!(s.distance(Vector3::new(4.0, -1.0, 0.0)), -1.0, epsilon = 1e-12);
    assert_relative_eq!(s.distance(Vector3::new(4.0, 1.0, 0.0)), 1.0, epsilon = 1e-12);
}
