//! Integration tests for the parametric single-mesh sources.

use proptest::prelude::*;
use vista::*;

fn direction() -> impl Strategy<Value = Vec3> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_map(Vec3::from)
        .prop_filter("non-zero direction", |d| d.length() > 0.1)
}

fn point() -> impl Strategy<Value = Vec3> {
    (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0).prop_map(Vec3::from)
}

#[test]
fn test_scene_of_sources() {
    let mut scene = MultiBlock::new();
    scene.append(Some("cone"), ConeSource::new().output().unwrap());
    scene.append(
        Some("sphere"),
        SphereSource::from_config(&SphereConfig::default().with_center(Vec3::new(2.0, 0.0, 0.0)))
            .unwrap()
            .output(),
    );
    scene.append(
        Some("solid"),
        PlatonicSolidSource::new(PlatonicKind::Octahedron)
            .with_center(Vec3::new(0.0, 3.0, 0.0))
            .output(),
    );
    scene.append(Some("box"), BoxSource::default().output());

    let b = scene.bounds().unwrap();
    assert!(b.min.abs_diff_eq(Vec3::splat(-1.0), 1e-5));
    assert!((b.max.x - 2.5).abs() < 1e-5);
    assert!((b.max.y - 4.0).abs() < 1e-5);

    let outline = scene.outline(false, true);
    assert_eq!(outline.n_lines(), 4 * 12);
    let combined = scene.combine(false, 0.0).unwrap();
    assert_eq!(combined.n_points(), scene.n_points());
}

#[test]
fn test_configs_from_json() {
    let cone = ConeConfig::from_json(r#"{"angle": 30.0, "resolution": 12}"#).unwrap();
    assert_eq!(cone.resolution, 12);
    let arrow = ArrowConfig::from_json(r#"{"tip_length": 0.5, "auto_scale": true}"#).unwrap();
    assert!(arrow.auto_scale);
    let sq = SuperquadricConfig::from_json(r#"{"toroidal": true}"#).unwrap();
    assert!(sq.toroidal);
    assert!(matches!(
        DiscConfig::from_json(r#"{"circumferential_resolution": 2}"#),
        Err(VistaError::Range { .. })
    ));
    assert!(matches!(
        PolygonConfig::from_json("not json"),
        Err(VistaError::JsonError(_))
    ));
}

proptest! {
    #[test]
    fn cylinder_wraps_its_axis(
        center in point(),
        dir in direction(),
        radius in 0.1f32..3.0,
        height in 0.1f32..5.0,
    ) {
        let config = CylinderConfig::default()
            .with_center(center)
            .with_direction(dir)
            .with_radius(radius)
            .with_height(height)
            .with_resolution(12);
        let mesh = CylinderSource::from_config(&config).unwrap().output().unwrap();
        let axis = dir.normalize();
        for &p in mesh.points() {
            let along = (p - center).dot(axis);
            let across = (p - center - along * axis).length();
            prop_assert!((along.abs() - height / 2.0).abs() < 1e-3);
            prop_assert!((across - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn arrow_tip_lands_on_direction(start in point(), dir in direction(), scale in 0.1f32..4.0) {
        let config = ArrowConfig::default()
            .with_start(start)
            .with_direction(dir)
            .with_scale(scale);
        let mesh = ArrowSource::from_config(&config).unwrap().output().unwrap();
        let tip = start + dir.normalize() * scale;
        let nearest = mesh
            .points()
            .iter()
            .map(|p| p.distance(tip))
            .fold(f32::MAX, f32::min);
        prop_assert!(nearest < 1e-3);
        let axis = dir.normalize();
        for &p in mesh.points() {
            let along = (p - start).dot(axis);
            prop_assert!(along > -1e-3 && along < scale + 1e-3);
        }
    }
}
