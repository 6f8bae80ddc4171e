use approx::assert_relative_eq;
use nalgebra::Vector3;
use volsdf::{Frame, Node, Sdf};

#[test]
fn sphere_gradient_is_radial() {
    let s = Node::sphere(Vector3::zeros(), 1.0);
    let g = s.gradient(Vector3::new(3.0, 4.0, 0.0), 1e-6);
    assert_relative_eq!(g, Vector3::new(0.6, 0.8, 0.0), epsilon = 1e-6);
}

#[test]
fn exact_fields_have_unit_gradient() {
    let shapes = [
        Node::sphere(Vector3::new(1.0, -1.0, 0.5), 2.0),
        Node::torus(3.0, 0.5),
        Node::cylinder(1.0, 4.0),
    ];
    let points = [
        Vector3::new(4.0, 1.0, 2.0),
        Vector3::new(-2.5, 0.7, 0.3),
        Vector3::new(0.4, -0.3, 6.0),
    ];
    for shape in &shapes {
        for &p in &points {
            assert_relative_eq!(shape.gradient(p, 1e-6).norm(), 1.0, epsilon = 1e-5);
        }
    }
}

#[test]
fn box_face_normal_is_axis() {
    let b = Node::cuboid(Vector3::repeat(1.0));
    let n = b.normal(Vector3::new(2.0, 0.1, -0.2)).unwrap();
    assert_relative_eq!(n, Vector3::x(), epsilon = 1e-9);
    let n = b.normal(Vector3::new(0.1, 0.2, -1.0)).unwrap();
    assert_relative_eq!(n, -Vector3::z(), epsilon = 1e-9);
}

#[test]
fn framed_torus_normal_follows_frame() {
    let frame = Frame::new(
        Vector3::new(1.0, 2.0, -1.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 0.3, 1.0),
    )
    .unwrap();
    let torus = Node::torus(3.0, 0.5).with_frame(frame);
    let p = frame.to_world(Vector3::new(4.0, 0.0, 0.0));
    let n = torus.normal(p).unwrap();
    assert_relative_eq!(n, frame.xaxis(), epsilon = 1e-6);
}

#[test]
fn normal_is_undefined_at_sphere_center() {
    let s = Node::sphere(Vector3::new(1.0, 2.0, 3.0), 1.0);
    assert!(s.normal(Vector3::new(1.0, 2.0, 3.0)).is_none());
}

#[test]
fn mean_curvature_of_round_surfaces() {
    let sphere = Node::sphere(Vector3::zeros(), 2.0);
    assert_relative_eq!(sphere.mean_curvature(Vector3::new(2.0, 0.0, 0.0), 1e-3), 0.5, epsilon = 1e-4);

    // One principal curvature is zero along the axis.
    let cylinder = Node::cylinder(2.0, 10.0);
    assert_relative_eq!(
        cylinder.mean_curvature(Vector3::new(2.0, 0.0, 0.0), 1e-3),
        0.25,
        epsilon = 1e-4
    );

    let cuboid = Node::cuboid(Vector3::repeat(1.0));
    assert_relative_eq!(
        cuboid.mean_curvature(Vector3::new(1.0, 0.1, 0.2), 1e-3),
        0.0,
        epsilon = 1e-6
    );
}

#[test]
fn gradient_through_trait_object() {
    let u = Node::union(Node::sphere(Vector3::zeros(), 1.0), Node::torus(5.0, 0.5));
    let field: &dyn Sdf = &u;
    let n = field.normal(Vector3::new(0.0, 0.0, 2.0)).unwrap();
    assert_relative_eq!(n, Vector3::z(), epsilon = 1e-6);
}
