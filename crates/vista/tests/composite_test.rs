//! Integration tests for composite filters over source output.

use vista::*;

fn scene() -> MultiBlock {
    let mut axes = AxesGeometrySource::new();
    let mut faces = CubeFacesSource::new();
    faces.set_shrink_factor(Some(0.9)).unwrap();
    let mut planes = OrthogonalPlanesSource::new();

    let mut scene = MultiBlock::new();
    scene.append(Some("axes"), axes.output());
    scene.append(Some("faces"), faces.output());
    scene.append(Some("planes"), planes.output());
    scene
}

#[test]
fn test_nested_counts() {
    let scene = scene();
    assert_eq!(scene.len(), 3);
    let faces = scene.get("faces").and_then(Block::as_composite).unwrap();
    assert_eq!(faces.len(), 6);
    assert_eq!(faces.n_points(), 24);
    assert_eq!(
        scene.n_points(),
        scene
            .iter()
            .map(|(_, b)| b.as_composite().unwrap().n_points())
            .sum::<usize>()
    );
}

#[test]
fn test_extract_and_combine() {
    let mut planes = OrthogonalPlanesSource::new();
    let output = planes.output();
    let extracted = output.extract_geometry();
    assert_eq!(extracted.n_points(), 27);
    assert_eq!(extracted.n_faces(), 12);

    // Each pair of planes shares a line of 3 points; all three share the origin.
    let merged = output.combine(true, 1e-6).unwrap();
    assert_eq!(merged.n_points(), 27 - 3 * 3 + 1);
    assert_eq!(merged.n_faces(), 12);
    merged.validate().unwrap();

    assert!(matches!(
        output.combine(true, -1.0),
        Err(VistaError::Range { .. })
    ));
}

#[test]
fn test_slice_cube_faces() {
    let mut faces = CubeFacesSource::new();
    let output = faces.output();
    let sliced = output.slice(&Plane::xy());
    // The four side faces are cut; the top and bottom faces are parallel.
    for name in ["+X", "-X", "+Y", "-Y"] {
        assert_eq!(sliced.mesh(name).unwrap().n_lines(), 1, "{name}");
    }
    for name in ["+Z", "-Z"] {
        assert_eq!(sliced.mesh(name).unwrap().n_lines(), 0, "{name}");
    }
    let outline = sliced.combine(true, 1e-6).unwrap();
    assert_eq!(outline.n_points(), 4);
    assert_eq!(outline.n_lines(), 4);
}

#[test]
fn test_compute_normals_on_sources() {
    let mut faces = CubeFacesSource::new();
    let with_normals = faces
        .output()
        .compute_normals(&NormalsOptions::default().with_point_normals(false));
    let plus_y = with_normals.mesh("+Y").unwrap();
    assert!(plus_y.point_normals().is_none());
    assert!(plus_y.face_normals().unwrap()[0].abs_diff_eq(Vec3::Y, 1e-6));

    let flipped = faces
        .output()
        .compute_normals(&NormalsOptions::default().with_flip_normals(true));
    let minus_x = flipped.mesh("-X").unwrap();
    assert!(minus_x
        .point_normals()
        .unwrap()
        .iter()
        .all(|n| n.abs_diff_eq(Vec3::X, 1e-6)));
}

#[test]
fn test_transform_scene() {
    let mut scene = scene();
    let before = scene.bounds().unwrap();
    let rotation = axis_angle_rotation(Vec3::Z, 90.0, None).unwrap();
    let shift = Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)).to_matrix();
    scene.transform(&(shift * rotation));

    let after = scene.bounds().unwrap();
    assert!((after.center().z - before.center().z - 5.0).abs() < 1e-5);
    // A quarter turn about z swaps the x and y extents.
    assert!((after.extent().x - before.extent().y).abs() < 1e-5);
    assert!((after.extent().y - before.extent().x).abs() < 1e-5);

    let mirror = reflection(Vec3::X, None).unwrap();
    let axes = scene.get("axes").and_then(Block::as_composite).unwrap().clone();
    let mut mirrored = axes.clone();
    mirrored.transform(&mirror);
    let shaft = mirrored.mesh("x_shaft").unwrap();
    let original = axes.mesh("x_shaft").unwrap();
    // Winding reverses under reflection so the faces keep pointing outward.
    assert_eq!(
        shaft.faces()[0],
        original.faces()[0].iter().rev().copied().collect::<Vec<_>>()
    );
}

#[test]
fn test_config_files() {
    let config = CubeFacesConfig::default().with_explode_factor(0.1);
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed = CubeFacesConfig::from_json(&json).unwrap();
    let mut faces = CubeFacesSource::from_config(&parsed).unwrap();
    assert_eq!(faces.explode_factor(), Some(0.1));
    assert_eq!(faces.output().len(), 6);

    let axes = AxesGeometryConfig::from_json(r#"{"symmetric": true, "tip_type": "octahedron"}"#);
    let mut axes = AxesGeometrySource::from_config(&axes.unwrap()).unwrap();
    assert!(axes.symmetric());
    assert_eq!(axes.tip_type(), "octahedron");
    assert_eq!(axes.output().len(), 6);

    let planes = OrthogonalPlanesConfig::from_json(r#"{"resolution": [1, 1, 1]}"#).unwrap();
    let mut planes = OrthogonalPlanesSource::from_config(&planes).unwrap();
    assert_eq!(planes.output().n_faces(), 3);
}
